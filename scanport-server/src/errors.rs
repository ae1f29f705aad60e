use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scanport_core::ScanError;
use serde::Serialize;
use std::fmt;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

/// Wire shape of every error: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: &self.message,
        });
        (self.status, body).into_response()
    }
}

// Every scan failure is a 500; the message is what the caller sees.
impl From<ScanError> for AppError {
    fn from(err: ScanError) -> Self {
        match &err {
            ScanError::ExecutableMissing { path } => {
                error!(path = %path.display(), "scanner executable missing")
            }
            ScanError::ScanFailed { message } => {
                error!(%message, "scan failed")
            }
            ScanError::Spawn { .. }
            | ScanError::Io(_)
            | ScanError::Interrupted(_) => error!(error = %err, "scan aborted"),
        }
        Self::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn scan_errors_map_to_internal_server_error() {
        let missing: AppError = ScanError::ExecutableMissing {
            path: PathBuf::from("C:/scanner/naps2.console.exe"),
        }
        .into();
        assert_eq!(missing.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(missing.message, "NAPS2 not found: C:/scanner/naps2.console.exe");

        let failed: AppError = ScanError::ScanFailed {
            message: "jam".into(),
        }
        .into();
        assert_eq!(failed.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(failed.message, "jam");

        let interrupted: AppError = ScanError::Interrupted("task panicked".into()).into();
        assert_eq!(interrupted.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_has_a_single_error_key() {
        let body = serde_json::to_value(ErrorBody { error: "jam" }).expect("serialize");
        assert_eq!(body, serde_json::json!({ "error": "jam" }));
    }
}
