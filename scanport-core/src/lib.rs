//! # Scanport Core
//!
//! Device-facing half of the scanport service: it names scan artifacts,
//! drives the NAPS2 console executable and serialises access to the
//! physical scanner.
//!
//! ## Overview
//!
//! - [`artifact`]: timestamped `scan_<YYYYMMDD_HHMMSS>.jpg` files under the scans directory
//! - [`invoker`]: the [`ScanInvoker`] seam between the service and whatever produces pages
//! - [`naps2`]: the production invoker that spawns `naps2.console.exe`
//! - [`service`]: [`ScanService`], one scan per call, one scan at a time
//!
//! Handlers never talk to the process layer directly; they hold a
//! [`ScanService`] built at startup and map [`ScanError`] onto responses.

pub mod artifact;
pub mod error;
pub mod invoker;
pub mod naps2;
pub mod service;

pub use artifact::ScanArtifact;
pub use error::{Result, ScanError};
pub use invoker::{InvocationOutput, NO_PAGES_SCANNED, ScanInvoker};
pub use naps2::{DEFAULT_EXECUTABLE_NAME, Naps2Invoker, ScannerProfile};
pub use service::{Clock, ScanService, ScannedImage, SystemClock};
