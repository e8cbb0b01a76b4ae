use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use menuchat_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{message}")]
    InternalServerError {
        message: String,
        details: Option<String>,
    },
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::InternalServerError {
            message: message.into(),
            details: None,
        }
    }

    /// Replaces the public message of a 5xx error, keeping its cause as details.
    /// Client errors keep their own message.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        match self {
            ApiError::InternalServerError { message: cause, details } => {
                ApiError::InternalServerError {
                    message: message.into(),
                    details: details.or(Some(cause)),
                }
            }
            other => other,
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "E_NOT_FOUND"),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "E_PAYLOAD_TOO_LARGE"),
            ApiError::InternalServerError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "E_INTERNAL_SERVER_ERROR")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidMediaType
            | CoreError::MissingFile
            | CoreError::EmptyFile => ApiError::BadRequest(error.to_string()),
            CoreError::FileTooLarge { .. } => ApiError::PayloadTooLarge(error.to_string()),
            CoreError::NotFound(message) => ApiError::NotFound(message),
            CoreError::Storage(_)
            | CoreError::Extraction(_)
            | CoreError::ExternalServiceError(_)
            | CoreError::InvalidConfiguration(_) => ApiError::InternalServerError {
                message: "Internal server error".to_string(),
                details: Some(error.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ApiErrorResponse {
    pub code: String,
    pub status: u16,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if let ApiError::InternalServerError { message, details } = &self {
            error!(message = %message, details = ?details, "Request failed");
        }

        let details = match &self {
            ApiError::InternalServerError { details, .. } => details.clone(),
            _ => None,
        };

        let body = ApiErrorResponse {
            code: code.to_string(),
            status: status.as_u16(),
            error: self.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor that runs `validator` rules and turns every rejection
/// into a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::BadRequest(errors.to_string()))?;

        Ok(ValidateJson(value))
    }
}
