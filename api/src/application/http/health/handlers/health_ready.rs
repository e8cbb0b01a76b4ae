use axum::extract::State;
use menuchat_core::domain::health::{entities::StoreHealthStatus, ports::HealthCheckService};

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    summary = "Readiness probe",
    description = "Checks that the menu store directory is usable.",
    responses(
        (status = 200, body = StoreHealthStatus),
        (status = 500, description = "Menu store unavailable", body = ApiErrorResponse)
    ),
)]
pub async fn health_ready(
    State(state): State<AppState>,
) -> Result<Response<StoreHealthStatus>, ApiError> {
    let status = state
        .service
        .readness()
        .await
        .map_err(|e| ApiError::from(e).with_message("Menu store unavailable"))?;

    Ok(Response::OK(status))
}
