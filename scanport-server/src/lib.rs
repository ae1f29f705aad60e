//! # Scanport Server
//!
//! HTTP front for a single NAPS2-driven document scanner.
//!
//! - `POST /scan` runs one scan and answers with the image bytes, or a 500
//!   carrying `{"error": "<message>"}`
//! - `GET /health` reports whether the scanner install looks usable
//!
//! Every response carries `Access-Control-Allow-Origin: *`.

pub mod errors;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
pub use routes::create_app;
