use std::convert::Infallible;

use axum::{
    extract::State,
    response::{
        IntoResponse, Response as AxumResponse,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::StreamExt;
use menuchat_core::domain::chat::ports::ChatService;
use tracing::error;

use crate::application::http::{
    chat::{
        handlers::stream_chat::CHAT_FAILURE_MESSAGE,
        stream_protocol::{delta_event, error_event},
        validators::ChatRequestValidator,
    },
    server::{
        api_entities::api_error::{ApiError, ApiErrorResponse, ValidateJson},
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/chat/sse",
    tag = "chat",
    summary = "Chat about the menu over server-sent events",
    description = "Streams the same reply as `/chat` as `data: {\"delta\": ...}` events followed by `data: [DONE]`.",
    request_body = ChatRequestValidator,
    responses(
        (status = 200, description = "Event stream", content_type = "text/event-stream", body = String),
        (status = 400, description = "Empty or malformed conversation", body = ApiErrorResponse),
        (status = 500, description = "Failed to process chat request", body = ApiErrorResponse)
    ),
)]
pub async fn stream_chat_events(
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

    let events = async_stream::stream! {
        while let Some(chunk) = completion.next().await {
            match chunk {
                Ok(text) => yield Ok::<_, Infallible>(Event::default().data(delta_event(&text))),
                Err(e) => {
                    error!(error = %e, "Chat completion failed mid-stream");
                    yield Ok(Event::default().event("error").data(error_event(&e.to_string())));
                    break;
                }
            }
        }

        yield Ok(Event::default().data("[DONE]"));
    };

    Ok(Sse::new(events)
        .keep_alive(KeepAlive::new())
        .into_response())
}
