use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{health_handler, scan_handler},
    infra::app_state::AppState,
};

pub const SCAN: &str = "/scan";
pub const HEALTH: &str = "/health";

/// Build the full application router.
///
/// The CORS layer sits outermost, so success bodies, handler errors and
/// preflight replies all carry `Access-Control-Allow-Origin: *`.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(SCAN, post(scan_handler))
        .route(HEALTH, get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Allow every origin, method and header.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(AllowMethods::any())
        .allow_headers(AllowHeaders::any())
}
