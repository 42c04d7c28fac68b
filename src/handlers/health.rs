use crate::{db, handlers::AppState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;

/// Basic liveness check with a database ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match db::ping(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "up",
                "version": env!("CARGO_PKG_VERSION"),
            })),
        ),
        Err(e) => {
            error!(error = %e, "Health check database ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "down",
                    "version": env!("CARGO_PKG_VERSION"),
                })),
            )
        }
    }
}
