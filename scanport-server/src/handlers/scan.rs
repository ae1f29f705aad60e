use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{errors::AppResult, infra::app_state::AppState};

/// POST /scan - Trigger the scanner and return the scanned page.
///
/// Takes no input. Responds with the raw image bytes on success; any failure
/// becomes a 500 with `{"error": "<message>"}`.
pub async fn scan_handler(State(state): State<AppState>) -> AppResult<Response> {
    let image = state.scan_service().scan().await?;

    Ok((
        [(header::CONTENT_TYPE, state.config().profile.content_type())],
        image.bytes,
    )
        .into_response())
}
