pub mod gemini_client;
pub mod openai_client;
pub mod sse;

pub use gemini_client::GeminiLLMClient;
pub use openai_client::OpenAiClient;

use crate::domain::{
    chat::{
        entities::CompletionRequest,
        ports::{CompletionProvider, CompletionStream},
    },
    common::entities::app_errors::CoreError,
};

/// Completion backend selected from configuration.
#[derive(Debug, Clone)]
pub enum ChatProvider {
    Gemini(GeminiLLMClient),
    OpenAi(OpenAiClient),
}

impl ChatProvider {
    pub fn name(&self) -> &'static str {
        match self {
            ChatProvider::Gemini(_) => "gemini",
            ChatProvider::OpenAi(_) => "openai",
        }
    }
}

impl CompletionProvider for ChatProvider {
    async fn stream_chat(&self, request: CompletionRequest) -> Result<CompletionStream, CoreError> {
        match self {
            ChatProvider::Gemini(client) => client.stream_chat(request).await,
            ChatProvider::OpenAi(client) => client.stream_chat(request).await,
        }
    }
}
