use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        chat::{
            entities::{ChatRole, CompletionRequest},
            ports::{CompletionProvider, CompletionStream},
        },
        common::entities::app_errors::CoreError,
        menu::entities::MenuMediaType,
        menu_analysis::ports::VisionClient,
    },
    infrastructure::llm::sse::sse_data_stream,
};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    base_url: String,
    model_name: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    #[serde(default)]
    message: String,
}

impl GeminiResponse {
    /// Text of the first candidate, `None` when the model returned nothing usable.
    fn first_text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        (!text.is_empty()).then_some(text)
    }
}

impl GeminiLLMClient {
    pub fn new(api_key: String, base_url: String, model_name: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model_name,
            client: Client::new(),
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, self.model_name, method)
    }

    async fn send(
        &self,
        method: &str,
        query: &[(&str, &str)],
        request: &GeminiRequest,
    ) -> Result<reqwest::Response, CoreError> {
        let response = self
            .client
            .post(self.endpoint(method))
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        Ok(response)
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<Option<String>, CoreError> {
        let response = self.send("generateContent", &[], &request).await?;

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        let text = gemini_response.first_text();
        if text.is_none() {
            tracing::warn!(model = %self.model_name, "Gemini returned no candidate text");
        }

        Ok(text)
    }

    fn chat_request(request: CompletionRequest) -> GeminiRequest {
        // Gemini only takes a single system instruction, so system turns from
        // the history are folded into it.
        let mut system_parts = vec![Part::Text {
            text: request.system_instruction,
        }];
        let mut contents = Vec::with_capacity(request.history.len());

        for message in request.history {
            let role = match message.role {
                ChatRole::System => {
                    system_parts.push(Part::Text {
                        text: message.content,
                    });
                    continue;
                }
                ChatRole::User => "user",
                ChatRole::Assistant => "model",
            };

            contents.push(Content {
                role: Some(role.to_string()),
                parts: vec![Part::Text {
                    text: message.content,
                }],
            });
        }

        GeminiRequest {
            contents,
            system_instruction: Some(Content {
                role: None,
                parts: system_parts,
            }),
            generation_config: Some(GenerationConfig {
                temperature: request.sampling.temperature,
                max_output_tokens: request.sampling.max_output_tokens,
            }),
        }
    }
}

fn parse_stream_chunk(data: String) -> Result<Option<String>, CoreError> {
    let chunk: GeminiResponse = serde_json::from_str(&data).map_err(|e| {
        tracing::error!("Failed to parse Gemini stream chunk: {}", e);
        CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
    })?;

    if let Some(error) = chunk.error {
        return Err(CoreError::ExternalServiceError(format!(
            "LLM API returned error: {}",
            error.message
        )));
    }

    Ok(chunk.first_text())
}

impl VisionClient for GeminiLLMClient {
    async fn transcribe_image(
        &self,
        instruction: String,
        media_type: MenuMediaType,
        image_data: Bytes,
    ) -> Result<Option<String>, CoreError> {
        let base64_image = general_purpose::STANDARD.encode(&image_data);

        let request = GeminiRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::Text { text: instruction },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: media_type.mime_type().to_string(),
                            data: base64_image,
                        },
                    },
                ],
            }],
            system_instruction: None,
            generation_config: None,
        };

        self.call_gemini_api(request).await
    }
}

impl CompletionProvider for GeminiLLMClient {
    async fn stream_chat(&self, request: CompletionRequest) -> Result<CompletionStream, CoreError> {
        let request = Self::chat_request(request);
        let response = self
            .send("streamGenerateContent", &[("alt", "sse")], &request)
            .await?;

        let chunks = sse_data_stream(response.bytes_stream())
            .and_then(|data| futures::future::ready(parse_stream_chunk(data)))
            .try_filter_map(|text| futures::future::ready(Ok(text)));

        Ok(chunks.boxed())
    }
}
