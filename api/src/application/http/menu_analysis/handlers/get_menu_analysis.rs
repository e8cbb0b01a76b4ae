use axum::extract::{Path, State};
use menuchat_core::domain::menu_analysis::{entities::AnalysisRecord, ports::MenuAnalysisService};

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/menus/{menu_id}/analysis",
    tag = "menu",
    summary = "Get menu analysis",
    description = "Returns the stored analysis of one uploaded menu.",
    params(
        ("menu_id" = String, Path, description = "Menu ID"),
    ),
    responses(
        (status = 200, body = AnalysisRecord),
        (status = 404, description = "Menu was never analyzed", body = ApiErrorResponse)
    ),
)]
pub async fn get_menu_analysis(
    Path(menu_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<AnalysisRecord>, ApiError> {
    let analysis = state
        .service
        .get_menu_analysis(menu_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(analysis))
}
