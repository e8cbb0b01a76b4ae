use axum::{Router, routing::post};
use utoipa::OpenApi;

use crate::application::http::server::app_state::AppState;

use super::handlers::{
    stream_chat::{__path_stream_chat, stream_chat},
    stream_chat_events::{__path_stream_chat_events, stream_chat_events},
};

#[derive(OpenApi)]
#[openapi(paths(stream_chat, stream_chat_events))]
pub struct ChatApiDoc;

pub fn chat_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/chat", state.args.server.root_path),
            post(stream_chat),
        )
        .route(
            &format!("{}/api/chat/sse", state.args.server.root_path),
            post(stream_chat_events),
        )
}
