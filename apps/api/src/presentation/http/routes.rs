use super::{
    handlers::{analyze, health},
    middleware::{logging::logging_middleware, request_id::request_id_middleware},
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::hello))
        .route("/health", get(health::health_check))
        .route("/analyze", post(analyze::analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
