use std::convert::Infallible;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, header::CONTENT_TYPE},
    response::{IntoResponse, Response as AxumResponse},
};
use bytes::Bytes;
use futures::StreamExt;
use menuchat_core::domain::chat::ports::ChatService;
use tracing::error;

use crate::application::http::{
    chat::{
        stream_protocol::{
            DATA_STREAM_HEADER, DATA_STREAM_VERSION, error_part, finish_part, text_part,
        },
        validators::ChatRequestValidator,
    },
    server::{
        api_entities::api_error::{ApiError, ApiErrorResponse, ValidateJson},
        app_state::AppState,
    },
};

pub const CHAT_FAILURE_MESSAGE: &str = "Failed to process chat request";

#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    summary = "Chat about the menu",
    description = "Streams the assistant reply as data-stream lines: `0:\"text\"` per chunk, `3:\"error\"` on failure, `d:{...}` when done.",
    request_body = ChatRequestValidator,
    responses(
        (status = 200, description = "Streamed reply", content_type = "text/plain", body = String),
        (status = 400, description = "Empty or malformed conversation", body = ApiErrorResponse),
        (status = 500, description = "Failed to process chat request", body = ApiErrorResponse)
    ),
)]
pub async fn stream_chat(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<ChatRequestValidator>,
) -> Result<AxumResponse, ApiError> {
    let mut completion = state
        .service
        .stream_chat(payload.into())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to start chat completion");
            ApiError::from(e).with_message(CHAT_FAILURE_MESSAGE)
        })?;

    let body = async_stream::stream! {
        let mut failed = false;
        while let Some(chunk) = completion.next().await {
            match chunk {
                Ok(text) => yield Ok::<_, Infallible>(Bytes::from(text_part(&text))),
                Err(e) => {
                    error!(error = %e, "Chat completion failed mid-stream");
                    yield Ok(Bytes::from(error_part(&e.to_string())));
                    failed = true;
                    break;
                }
            }
        }

        if !failed {
            yield Ok(Bytes::from(finish_part()));
        }
    };

    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8"),
            (HeaderName::from_static(DATA_STREAM_HEADER), DATA_STREAM_VERSION),
        ],
        Body::from_stream(body),
    )
        .into_response())
}
