//! NAPS2 console invoker.
//!
//! Spawns `naps2.console.exe` once per scan with a fixed profile:
//!
//! ```text
//! naps2.console.exe --driver wia --device "CANON DR-M160 USB" --source glass -o <output> -f jpg
//! ```
//!
//! The child is awaited with `tokio::process`, so the runtime keeps serving
//! other requests while the device is busy. There is no timeout, and the
//! child is not killed if the awaiting future is dropped.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::Stdio,
};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::{
    error::{Result, ScanError},
    invoker::{InvocationOutput, ScanInvoker},
};

/// File name of the NAPS2 console executable inside the install dir.
pub const DEFAULT_EXECUTABLE_NAME: &str = "naps2.console.exe";

/// Windows Image Acquisition driver.
pub const DEFAULT_DRIVER: &str = "wia";
/// Device name as NAPS2 lists it.
pub const DEFAULT_DEVICE: &str = "CANON DR-M160 USB";
/// Flatbed glass.
pub const DEFAULT_SOURCE: &str = "glass";
/// JPEG output.
pub const DEFAULT_FORMAT: &str = "jpg";

/// Driver, device and output settings passed to NAPS2 on every scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerProfile {
    /// `--driver`
    pub driver: String,
    /// `--device`
    pub device: String,
    /// `--source`
    pub source: String,
    /// `-f`; also the artifact extension.
    pub format: String,
}

impl Default for ScannerProfile {
    fn default() -> Self {
        Self {
            driver: DEFAULT_DRIVER.to_string(),
            device: DEFAULT_DEVICE.to_string(),
            source: DEFAULT_SOURCE.to_string(),
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

impl ScannerProfile {
    /// File extension of the artifacts this profile produces.
    pub fn extension(&self) -> &str {
        &self.format
    }

    /// MIME type served for artifacts of this profile.
    pub fn content_type(&self) -> &'static str {
        match self.format.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "bmp" => "image/bmp",
            "tif" | "tiff" => "image/tiff",
            "pdf" => "application/pdf",
            _ => "application/octet-stream",
        }
    }
}

/// [`ScanInvoker`] backed by `naps2.console.exe`.
#[derive(Debug, Clone)]
pub struct Naps2Invoker {
    executable: PathBuf,
    profile: ScannerProfile,
}

impl Naps2Invoker {
    /// Invoker for the executable at `executable`, scanning with `profile`.
    pub fn new(executable: impl Into<PathBuf>, profile: ScannerProfile) -> Self {
        Self {
            executable: executable.into(),
            profile,
        }
    }

    /// Path checked by `preflight` and spawned by `invoke`.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Scanner settings passed on every run.
    pub fn profile(&self) -> &ScannerProfile {
        &self.profile
    }

    /// Arguments after the executable, in NAPS2 order.
    pub fn arguments(&self, output: &Path) -> Vec<OsString> {
        vec![
            "--driver".into(),
            self.profile.driver.clone().into(),
            "--device".into(),
            self.profile.device.clone().into(),
            "--source".into(),
            self.profile.source.clone().into(),
            "-o".into(),
            output.as_os_str().to_os_string(),
            "-f".into(),
            self.profile.format.clone().into(),
        ]
    }

    /// Space-joined command line, for logs only.
    pub fn command_line(&self, output: &Path) -> String {
        std::iter::once(self.executable.as_os_str().to_os_string())
            .chain(self.arguments(output))
            .map(|part| part.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl ScanInvoker for Naps2Invoker {
    async fn preflight(&self) -> Result<()> {
        let present = tokio::fs::metadata(&self.executable)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);

        if present {
            Ok(())
        } else {
            Err(ScanError::ExecutableMissing {
                path: self.executable.clone(),
            })
        }
    }

    async fn invoke(&self, output: &Path) -> Result<InvocationOutput> {
        info!(command = %self.command_line(output), "running scanner command");

        let result = Command::new(&self.executable)
            .args(self.arguments(output))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ScanError::Spawn {
                path: self.executable.clone(),
                source,
            })?;

        let output = InvocationOutput {
            exit_code: result.status.code(),
            stdout: String::from_utf8_lossy(&result.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
        };
        debug!(
            exit_code = ?output.exit_code,
            stdout_len = output.stdout.len(),
            stderr_len = output.stderr.len(),
            "scanner exited"
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_targets_the_flatbed_canon() {
        let invoker = Naps2Invoker::new("C:/naps2/naps2.console.exe", ScannerProfile::default());
        let args: Vec<String> = invoker
            .arguments(Path::new("C:/naps2/scans/scan_20250314_092653.jpg"))
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            args,
            [
                "--driver",
                "wia",
                "--device",
                "CANON DR-M160 USB",
                "--source",
                "glass",
                "-o",
                "C:/naps2/scans/scan_20250314_092653.jpg",
                "-f",
                "jpg",
            ]
        );
    }

    #[test]
    fn command_line_leads_with_the_executable() {
        let invoker = Naps2Invoker::new("/opt/naps2.console.exe", ScannerProfile::default());
        assert_eq!(
            invoker.command_line(Path::new("/tmp/out.jpg")),
            "/opt/naps2.console.exe --driver wia --device CANON DR-M160 USB --source glass -o /tmp/out.jpg -f jpg"
        );
    }

    #[test]
    fn custom_profile_changes_format_and_extension() {
        let profile = ScannerProfile {
            format: "png".into(),
            source: "feeder".into(),
            ..ScannerProfile::default()
        };
        assert_eq!(profile.extension(), "png");
        assert_eq!(profile.content_type(), "image/png");
        assert_eq!(ScannerProfile::default().content_type(), "image/jpeg");

        let invoker = Naps2Invoker::new("naps2", profile);
        let args = invoker.arguments(Path::new("out.png"));
        assert_eq!(args[5], OsString::from("feeder"));
        assert_eq!(args[9], OsString::from("png"));
    }

    #[tokio::test]
    async fn preflight_reports_missing_executable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join(DEFAULT_EXECUTABLE_NAME);
        let invoker = Naps2Invoker::new(&missing, ScannerProfile::default());

        match invoker.preflight().await {
            Err(ScanError::ExecutableMissing { path }) => assert_eq!(path, missing),
            other => panic!("expected ExecutableMissing, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn preflight_rejects_a_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let invoker = Naps2Invoker::new(dir.path(), ScannerProfile::default());
        assert!(matches!(
            invoker.preflight().await,
            Err(ScanError::ExecutableMissing { .. })
        ));
    }

    #[tokio::test]
    async fn preflight_accepts_a_regular_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let exe = dir.path().join(DEFAULT_EXECUTABLE_NAME);
        std::fs::write(&exe, b"").expect("write stub");

        let invoker = Naps2Invoker::new(&exe, ScannerProfile::default());
        invoker.preflight().await.expect("preflight should pass");
    }
}
