use std::path::Path;

use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use crate::infra::app_state::AppState;

/// GET /health - Report whether the scanner install looks usable.
///
/// Always answers 200; `status` is `degraded` when the executable or the
/// scans directory is missing.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let config = state.config();
    let executable_present = is_file(&config.executable).await;
    let scan_dir_present = is_dir(&config.scan_dir).await;

    let status = if executable_present && scan_dir_present {
        "healthy"
    } else {
        "degraded"
    };

    Json(json!({
        "status": status,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "busy": state.scan_service().is_busy(),
        "checks": {
            "scanner_executable": {
                "path": config.executable.display().to_string(),
                "present": executable_present,
            },
            "scan_directory": {
                "path": config.scan_dir.display().to_string(),
                "present": scan_dir_present,
            }
        }
    }))
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}
