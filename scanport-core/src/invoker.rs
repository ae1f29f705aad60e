//! The seam between the scan service and the process that drives the device.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Fallback error text when the scanner exits without producing an artifact
/// and without printing anything.
pub const NO_PAGES_SCANNED: &str = "No pages scanned";

/// What a finished scanner process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output, lossily decoded.
    pub stdout: String,
    /// Captured standard error, lossily decoded.
    pub stderr: String,
}

impl InvocationOutput {
    /// Exit code zero. Signals and other codes are failures.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Text to report when this invocation did not yield an artifact:
    /// stdout if non-empty, else stderr if non-empty, else
    /// [`NO_PAGES_SCANNED`].
    pub fn failure_message(&self) -> String {
        [self.stdout.as_str(), self.stderr.as_str()]
            .into_iter()
            .find(|text| !text.is_empty())
            .unwrap_or(NO_PAGES_SCANNED)
            .to_string()
    }
}

/// Capability that turns a target path into a finished scan attempt.
///
/// The production implementation spawns NAPS2; tests substitute stubs that
/// write (or do not write) the target file themselves.
#[async_trait]
pub trait ScanInvoker: Send + Sync {
    /// Checks that the device side is usable at all. Runs before the device
    /// lock is taken, so a misconfigured install fails fast.
    async fn preflight(&self) -> Result<()> {
        Ok(())
    }

    /// Run one scan writing to `output` and wait for it to finish.
    async fn invoke(&self, output: &Path) -> Result<InvocationOutput>;
}
