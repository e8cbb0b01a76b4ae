use axum::extract::State;
use menuchat_core::domain::menu_analysis::{
    ports::MenuAnalysisService, value_objects::AnalyzeMenuInput,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::{
    menu_analysis::validators::AnalyzeMenuValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

const ANALYSIS_SUCCESS_MESSAGE: &str = "Menu successfully analyzed";

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeMenuResponse {
    pub success: bool,
    pub menu_id: Uuid,
    pub menu_url: String,
    pub analysis: String,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/analyze-menu",
    tag = "menu",
    summary = "Analyze a menu",
    description = "Extracts the text of a stored menu (PDF text or image transcription) and makes it the active chat context.",
    request_body = AnalyzeMenuValidator,
    responses(
        (status = 200, body = AnalyzeMenuResponse),
        (status = 400, description = "Malformed body", body = ApiErrorResponse),
        (status = 404, description = "No menu to analyze", body = ApiErrorResponse),
        (status = 500, description = "Menu analysis failed", body = ApiErrorResponse)
    ),
)]
pub async fn analyze_menu(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyzeMenuValidator>,
) -> Result<Response<AnalyzeMenuResponse>, ApiError> {
    let analysis = state
        .service
        .analyze_menu(AnalyzeMenuInput {
            menu_id: payload.menu_id(),
        })
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to analyze menu");
            ApiError::from(e).with_message("Menu analysis failed!")
        })?;

    Ok(Response::OK(AnalyzeMenuResponse {
        success: true,
        menu_id: analysis.menu_id,
        menu_url: analysis.menu_url,
        analysis: analysis.menu_content,
        message: ANALYSIS_SUCCESS_MESSAGE.to_string(),
    }))
}
