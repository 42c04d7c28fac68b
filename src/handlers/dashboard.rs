use super::common::{map_service_error, success_response};
use crate::{errors::ApiError, handlers::AppState, services::reports::DashboardMetrics};
use axum::{extract::State, response::IntoResponse};

/// Dashboard aggregates: product count, total units, inventory value and the
/// low-stock list.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard metrics", body = DashboardMetrics),
    )
)]
pub async fn get_dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let metrics = state
        .services
        .reports
        .dashboard()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(metrics))
}
