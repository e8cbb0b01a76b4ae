use axum::extract::State;
use chrono::{DateTime, Utc};
use menuchat_core::domain::menu_analysis::{
    entities::{AnalysisRecord, MenuStatus},
    ports::MenuAnalysisService,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuData {
    pub menu_id: Uuid,
    pub menu_name: String,
    pub menu_url: String,
    pub mime_type: String,
    pub menu_content: String,
    pub analyzed_at: DateTime<Utc>,
    /// Same instant as `analyzed_at`, kept for clients of the older status shape
    pub uploaded_at: DateTime<Utc>,
}

impl From<AnalysisRecord> for MenuData {
    fn from(record: AnalysisRecord) -> Self {
        Self {
            menu_id: record.menu_id,
            menu_name: record.menu_name().to_string(),
            menu_url: record.menu_url,
            mime_type: record.mime_type,
            menu_content: record.menu_content,
            analyzed_at: record.analyzed_at,
            uploaded_at: record.analyzed_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuStatusResponse {
    pub has_menu: bool,
    pub menu_data: Option<MenuData>,
}

impl From<MenuStatus> for MenuStatusResponse {
    fn from(status: MenuStatus) -> Self {
        match status {
            MenuStatus::Found(record) => Self {
                has_menu: true,
                menu_data: Some(MenuData::from(record)),
            },
            MenuStatus::NotFound => Self {
                has_menu: false,
                menu_data: None,
            },
        }
    }
}

#[utoipa::path(
    get,
    path = "/check-menu-status",
    tag = "menu",
    summary = "Check menu status",
    description = "Reports whether an analyzed menu is available for chat.",
    responses(
        (status = 200, body = MenuStatusResponse),
        (status = 500, description = "Stored analysis could not be read", body = ApiErrorResponse)
    ),
)]
pub async fn check_menu_status(
    State(state): State<AppState>,
) -> Result<Response<MenuStatusResponse>, ApiError> {
    let status = state.service.get_menu_status().await.map_err(|e| {
        error!(error = %e, "Failed to check menu status");
        ApiError::from(e).with_message("Failed to check menu status!")
    })?;

    Ok(Response::OK(MenuStatusResponse::from(status)))
}
