//! Scan orchestration: preflight, device lock, invoke, verify, read back.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{DateTime, Local};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    artifact::ScanArtifact,
    error::{Result, ScanError},
    invoker::ScanInvoker,
};

/// Source of the wall-clock time used to name artifacts.
pub trait Clock: Send + Sync {
    /// Current local time.
    fn now(&self) -> DateTime<Local>;
}

/// [`Clock`] reading the system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A successful scan: the artifact left on disk and its contents.
#[derive(Debug, Clone)]
pub struct ScannedImage {
    /// File the scanner wrote.
    pub artifact: ScanArtifact,
    /// Its contents.
    pub bytes: Vec<u8>,
}

/// Runs scans against a single physical device.
///
/// Invocations are serialised: a second caller waits until the device is
/// released and then performs its own scan. Each scan runs in its own task,
/// so a caller that goes away does not abort the device mid-page and does
/// not release the lock early.
#[derive(Clone)]
pub struct ScanService {
    scan_dir: PathBuf,
    extension: String,
    invoker: Arc<dyn ScanInvoker>,
    clock: Arc<dyn Clock>,
    device: Arc<Mutex<()>>,
}

impl fmt::Debug for ScanService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanService")
            .field("scan_dir", &self.scan_dir)
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}

impl ScanService {
    /// Service writing `<scan_dir>/scan_<timestamp>.<extension>` through
    /// `invoker`, named by the system clock.
    pub fn new(
        scan_dir: impl Into<PathBuf>,
        extension: impl Into<String>,
        invoker: Arc<dyn ScanInvoker>,
    ) -> Self {
        Self {
            scan_dir: scan_dir.into(),
            extension: extension.into(),
            invoker,
            clock: Arc::new(SystemClock),
            device: Arc::new(Mutex::new(())),
        }
    }

    /// Replace the clock used to name artifacts.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Directory artifacts are written to.
    pub fn scan_dir(&self) -> &Path {
        &self.scan_dir
    }

    /// Whether a scan currently holds the device.
    pub fn is_busy(&self) -> bool {
        self.device.try_lock().is_err()
    }

    /// Perform one scan and return the produced image.
    pub async fn scan(&self) -> Result<ScannedImage> {
        let service = self.clone();
        tokio::spawn(async move { service.scan_exclusive().await })
            .await
            .map_err(|err| ScanError::Interrupted(err.to_string()))?
    }

    async fn scan_exclusive(&self) -> Result<ScannedImage> {
        self.invoker.preflight().await?;

        if self.is_busy() {
            debug!("scanner busy, waiting for the current scan to finish");
        }
        let _device = self.device.lock().await;

        let artifact =
            ScanArtifact::new(&self.scan_dir, self.clock.now(), &self.extension);
        let output = self.invoker.invoke(artifact.path()).await?;

        if !output.success() || !artifact.exists().await {
            let message = output.failure_message();
            warn!(
                exit_code = ?output.exit_code,
                path = %artifact.path().display(),
                %message,
                "scan produced no artifact"
            );
            return Err(ScanError::ScanFailed { message });
        }

        let bytes = artifact.read().await?;
        info!(
            file = artifact.file_name(),
            bytes = bytes.len(),
            "scan completed"
        );

        Ok(ScannedImage { artifact, bytes })
    }
}
