use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uploads: &'static str,
    version: &'static str,
}

pub async fn hello() -> &'static str {
    "Hello, World!"
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    // Check the upload directory is still there
    let uploads_status = match tokio::fs::metadata(&state.config.upload_dir).await {
        Ok(meta) if meta.is_dir() => "up",
        Ok(_) => {
            tracing::error!(
                "Health check failed: {} is not a directory",
                state.config.upload_dir.display()
            );
            "down"
        }
        Err(e) => {
            tracing::error!("Health check failed: upload directory unreachable: {}", e);
            "down"
        }
    };

    let status = if uploads_status == "up" {
        "healthy"
    } else {
        "unhealthy"
    };

    let response = HealthResponse {
        status,
        uploads: uploads_status,
        version: env!("CARGO_PKG_VERSION"),
    };

    let code = if status == "healthy" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(response))
}
