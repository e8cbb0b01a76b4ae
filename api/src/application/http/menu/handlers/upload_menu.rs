use axum::extract::{Multipart, State, multipart::MultipartError};
use axum::http::StatusCode;
use menuchat_core::domain::{
    common::entities::app_errors::CoreError,
    menu::{entities::UploadedMenuRecord, ports::MenuService, value_objects::UploadMenuInput},
};
use tracing::{error, warn};

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

pub const MENU_FILE_FIELD: &str = "menuFile";

fn multipart_error(state: &AppState, e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::PayloadTooLarge(format!(
            "File too large. Max size is {} bytes",
            state.args.storage.max_upload_bytes
        ));
    }

    warn!("Failed to read multipart body: {}", e);
    ApiError::BadRequest(format!("Failed to read multipart body: {}", e.body_text()))
}

#[utoipa::path(
    post,
    path = "/upload-menu",
    tag = "menu",
    summary = "Upload a menu",
    description = "Stores a PDF or image menu sent as the `menuFile` multipart field and makes it the latest upload.",
    request_body(content = String, content_type = "multipart/form-data", description = "Form with a `menuFile` file field"),
    responses(
        (status = 200, description = "Menu stored", body = UploadedMenuRecord),
        (status = 400, description = "Missing, empty or disallowed file", body = ApiErrorResponse),
        (status = 413, description = "File too large", body = ApiErrorResponse),
        (status = 500, description = "File upload failed", body = ApiErrorResponse)
    ),
)]
pub async fn upload_menu(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<UploadedMenuRecord>, ApiError> {
    let mut upload: Option<UploadMenuInput> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&state, e))?
    {
        if field.name() != Some(MENU_FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let mime_type = field.content_type().map(str::to_string);
        let file_data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&state, e))?;

        upload = Some(UploadMenuInput {
            original_name,
            mime_type,
            file_data,
        });
    }

    let upload = upload.ok_or_else(|| {
        warn!("Menu upload without a {} field", MENU_FILE_FIELD);
        ApiError::from(CoreError::MissingFile)
    })?;

    let record = state.service.upload_menu(upload).await.map_err(|e| {
        error!(error = %e, "Failed to upload menu");
        ApiError::from(e).with_message("File upload failed!")
    })?;

    Ok(Response::OK(record))
}
