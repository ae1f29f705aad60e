use anyhow::{Context, anyhow};
use clap::Args;
use scanport_core::{DEFAULT_EXECUTABLE_NAME, ScannerProfile};
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5123;
pub const DEFAULT_SCAN_DIR_NAME: &str = "scans";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Resolved runtime configuration. Built once at startup and shared with
/// handlers through `AppState`; nothing downstream looks paths up again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    /// Directory the service treats as its install location.
    pub base_dir: PathBuf,
    pub scan_dir: PathBuf,
    /// Location of `naps2.console.exe`.
    pub executable: PathBuf,
    pub profile: ScannerProfile,
}

/// Optional overrides for the fixed defaults. Each one is also read from the
/// environment (and from a `.env` file, loaded before parsing).
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Address to bind (default 127.0.0.1)
    #[arg(long, env = "SCANPORT_HOST")]
    pub host: Option<String>,

    /// Port to bind (default 5123)
    #[arg(short, long, env = "SCANPORT_PORT")]
    pub port: Option<u16>,

    /// Install directory (default: directory of this executable)
    #[arg(long, env = "SCANPORT_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Scan output directory; relative paths resolve against the base dir
    #[arg(long, env = "SCANPORT_SCAN_DIR")]
    pub scan_dir: Option<PathBuf>,

    /// Path to naps2.console.exe; relative paths resolve against the base dir
    #[arg(long, env = "SCANPORT_NAPS2_PATH")]
    pub naps2: Option<PathBuf>,

    /// NAPS2 driver (default wia)
    #[arg(long, env = "SCANPORT_DRIVER")]
    pub driver: Option<String>,

    /// Scanner device name (default "CANON DR-M160 USB")
    #[arg(long, env = "SCANPORT_DEVICE")]
    pub device: Option<String>,

    /// Paper source (default glass)
    #[arg(long, env = "SCANPORT_SOURCE")]
    pub source: Option<String>,

    /// Output format (default jpg)
    #[arg(long, env = "SCANPORT_FORMAT")]
    pub format: Option<String>,
}

impl Config {
    /// Defaults laid out under `base_dir`: `<base>/scans` and
    /// `<base>/naps2.console.exe`.
    pub fn for_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            server: ServerConfig::default(),
            scan_dir: base_dir.join(DEFAULT_SCAN_DIR_NAME),
            executable: base_dir.join(DEFAULT_EXECUTABLE_NAME),
            base_dir,
            profile: ScannerProfile::default(),
        }
    }

    pub fn resolve(overrides: ConfigOverrides) -> anyhow::Result<Self> {
        let base_dir = match overrides.base_dir {
            Some(dir) => dir,
            None => install_dir()?,
        };
        let mut config = Self::for_base_dir(base_dir);

        if let Some(host) = overrides.host {
            config.server.host = host;
        }
        if let Some(port) = overrides.port {
            config.server.port = port;
        }
        if let Some(dir) = overrides.scan_dir {
            config.scan_dir = config.base_dir.join(dir);
        }
        if let Some(exe) = overrides.naps2 {
            config.executable = config.base_dir.join(exe);
        }

        let profile = &mut config.profile;
        for (slot, value) in [
            (&mut profile.driver, overrides.driver),
            (&mut profile.device, overrides.device),
            (&mut profile.source, overrides.source),
            (&mut profile.format, overrides.format),
        ] {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                *slot = value;
            }
        }

        Ok(config)
    }

    /// Create the scans directory if it does not exist yet.
    pub fn ensure_directories(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.scan_dir).with_context(|| {
            format!("failed to create scan directory {}", self.scan_dir.display())
        })
    }

    pub fn executable_present(&self) -> bool {
        self.executable.is_file()
    }
}

/// Directory containing the running executable.
pub fn install_dir() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe()
        .context("failed to locate the running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("executable {} has no parent directory", exe.display()))
}
