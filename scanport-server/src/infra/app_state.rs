use std::{fmt, sync::Arc};

use scanport_core::{Naps2Invoker, ScanService};

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scan_service: ScanService,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Production state: scans go through NAPS2 at the configured path.
    pub fn new(config: Config) -> Self {
        let invoker =
            Naps2Invoker::new(config.executable.clone(), config.profile.clone());
        let scan_service = ScanService::new(
            config.scan_dir.clone(),
            config.profile.extension(),
            Arc::new(invoker),
        );
        Self::with_scan_service(config, scan_service)
    }

    pub fn with_scan_service(config: Config, scan_service: ScanService) -> Self {
        Self {
            config: Arc::new(config),
            scan_service,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scan_service(&self) -> &ScanService {
        &self.scan_service
    }
}
