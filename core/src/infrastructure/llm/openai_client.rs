use futures::{StreamExt, TryStreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        chat::{
            entities::CompletionRequest,
            ports::{CompletionProvider, CompletionStream},
            prompt::compose_conversation,
        },
        common::entities::app_errors::CoreError,
    },
    infrastructure::llm::sse::sse_data_stream,
};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    stream: bool,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiStreamResponse {
    #[serde(default)]
    choices: Vec<OpenAiStreamChoice>,
    #[serde(default)]
    error: Option<OpenAiError>,
}

#[derive(Debug, Deserialize)]
struct OpenAiStreamChoice {
    #[serde(default)]
    delta: Option<OpenAiDelta>,
}

#[derive(Debug, Deserialize)]
struct OpenAiDelta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    #[serde(default)]
    message: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            client: Client::new(),
        }
    }

    fn chat_request(&self, request: CompletionRequest) -> OpenAiRequest {
        let messages = compose_conversation(&request.system_instruction, &request.history)
            .into_iter()
            .map(|m| OpenAiMessage {
                role: m.role.as_str(),
                content: m.content,
            })
            .collect();

        OpenAiRequest {
            model: self.model.clone(),
            messages,
            stream: true,
            temperature: request.sampling.temperature,
            max_tokens: request.sampling.max_output_tokens,
        }
    }
}

fn parse_stream_chunk(data: &str) -> Result<Option<String>, CoreError> {
    let chunk: OpenAiStreamResponse = serde_json::from_str(data).map_err(|e| {
        tracing::error!("Failed to parse OpenAI stream chunk: {}", e);
        CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
    })?;

    if let Some(error) = chunk.error {
        return Err(CoreError::ExternalServiceError(format!(
            "LLM API returned error: {}",
            error.message
        )));
    }

    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .and_then(|delta| delta.content)
        .filter(|content| !content.is_empty()))
}

impl CompletionProvider for OpenAiClient {
    async fn stream_chat(&self, request: CompletionRequest) -> Result<CompletionStream, CoreError> {
        let body = self.chat_request(request);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("OpenAI API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let chunks = sse_data_stream(response.bytes_stream())
            .try_take_while(|data| futures::future::ready(Ok(data.as_str() != DONE_MARKER)))
            .try_filter_map(|data| futures::future::ready(parse_stream_chunk(&data)));

        Ok(chunks.boxed())
    }
}
