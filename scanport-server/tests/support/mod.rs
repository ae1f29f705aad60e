// Shared by several test binaries; not every helper is used by each.
#![allow(dead_code)]

use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use axum_test::TestServer;
use scanport_core::{InvocationOutput, Result, ScanInvoker, ScanService};
use scanport_server::{AppState, create_app, infra::config::Config};
use tempfile::TempDir;

/// Stand-in for the NAPS2 process: optionally writes `payload` to the
/// requested path, then reports the configured exit code and output.
#[derive(Debug, Default)]
pub struct StubScanner {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub payload: Option<Vec<u8>>,
    pub calls: AtomicUsize,
}

impl StubScanner {
    pub fn writing(payload: &[u8]) -> Self {
        Self {
            exit_code: Some(0),
            payload: Some(payload.to_vec()),
            ..Default::default()
        }
    }

    pub fn exiting(code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            exit_code: Some(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScanInvoker for StubScanner {
    async fn invoke(&self, output: &Path) -> Result<InvocationOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(payload) = &self.payload {
            tokio::fs::write(output, payload).await?;
        }
        Ok(InvocationOutput {
            exit_code: self.exit_code,
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
        })
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub config: Config,
    pub tempdir: TempDir,
}

impl TestApp {
    pub fn scan_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.config.scan_dir)
            .expect("read scan dir")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

fn test_config() -> (Config, TempDir) {
    let tempdir = tempfile::tempdir().expect("tempdir");
    let config = Config::for_base_dir(tempdir.path());
    config.ensure_directories().expect("create scan dir");
    (config, tempdir)
}

fn serve(state: AppState, config: Config, tempdir: TempDir) -> TestApp {
    let server = TestServer::builder()
        .build(create_app(state))
        .expect("build test server");
    TestApp {
        server,
        config,
        tempdir,
    }
}

/// App wired to the real NAPS2 invoker. No executable is installed.
pub fn app_without_scanner() -> TestApp {
    let (config, tempdir) = test_config();
    serve(AppState::new(config.clone()), config, tempdir)
}

/// App wired to a stub scanner.
pub fn app_with_stub(stub: Arc<StubScanner>) -> TestApp {
    let (config, tempdir) = test_config();
    let service = ScanService::new(config.scan_dir.clone(), "jpg", stub);
    serve(
        AppState::with_scan_service(config.clone(), service),
        config,
        tempdir,
    )
}
