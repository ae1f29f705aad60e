//! Scan artifact naming.
//!
//! Every scan writes exactly one file named after the local wall-clock time
//! at which the scan started, e.g. `scan_20250314_092653.jpg`. Names only
//! have one-second resolution, so two scans started within the same second
//! share a path.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime};

use crate::error::Result;

/// Leading part of every artifact file name.
pub const ARTIFACT_PREFIX: &str = "scan_";
/// `chrono` format of the timestamp between prefix and extension.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A single image file produced by one scan invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanArtifact {
    path: PathBuf,
    file_name: String,
    captured_at: NaiveDateTime,
}

impl ScanArtifact {
    /// Artifact under `scan_dir` for a scan started at `captured_at`.
    pub fn new(
        scan_dir: &Path,
        captured_at: DateTime<Local>,
        extension: &str,
    ) -> Self {
        let captured_at = captured_at.naive_local();
        let file_name = Self::file_name_for(captured_at, extension);
        Self {
            path: scan_dir.join(&file_name),
            file_name,
            captured_at,
        }
    }

    /// File name for a capture time, e.g. `scan_20250314_092653.jpg`.
    pub fn file_name_for(captured_at: NaiveDateTime, extension: &str) -> String {
        format!(
            "{ARTIFACT_PREFIX}{}.{extension}",
            captured_at.format(TIMESTAMP_FORMAT)
        )
    }

    /// Recover the capture time from a file name produced by
    /// [`ScanArtifact::file_name_for`].
    pub fn parse_file_name(file_name: &str) -> Option<NaiveDateTime> {
        let stem = file_name.strip_prefix(ARTIFACT_PREFIX)?;
        let (timestamp, extension) = stem.rsplit_once('.')?;
        if extension.is_empty() {
            return None;
        }
        NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()
    }

    /// Full path the scanner is told to write to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without directory.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Local time the scan started, at one-second resolution.
    pub fn captured_at(&self) -> NaiveDateTime {
        self.captured_at
    }

    /// Whether the scanner left the file behind. Probe errors count as absent.
    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Read the whole artifact into memory.
    pub async fn read(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}
