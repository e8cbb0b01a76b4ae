use std::future::Future;

use futures::stream::BoxStream;

use crate::domain::{
    chat::{
        entities::{ChatMessage, CompletionRequest},
        value_objects::StreamChatInput,
    },
    common::entities::app_errors::CoreError,
};

/// Text chunks of a completion, in arrival order.
pub type CompletionStream = BoxStream<'static, Result<String, CoreError>>;

/// Chat-completion backend. Errors before the first chunk are returned
/// directly; errors after that arrive inside the stream.
#[cfg_attr(test, mockall::automock)]
pub trait CompletionProvider: Send + Sync {
    fn stream_chat(
        &self,
        request: CompletionRequest,
    ) -> impl Future<Output = Result<CompletionStream, CoreError>> + Send;
}

/// Service trait for the menu-grounded chat
#[cfg_attr(test, mockall::automock)]
pub trait ChatService: Send + Sync {
    /// System instruction followed by the caller's turns, each with an id
    fn compose_conversation(
        &self,
        input: StreamChatInput,
    ) -> impl Future<Output = Result<Vec<ChatMessage>, CoreError>> + Send;

    fn stream_chat(
        &self,
        input: StreamChatInput,
    ) -> impl Future<Output = Result<CompletionStream, CoreError>> + Send;
}
