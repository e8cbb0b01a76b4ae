use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rand::{Rng, distributions::Alphanumeric};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct MenuChatConfig {
    pub storage: StorageConfig,
    pub llm: LLMConfig,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub uploads_dir: PathBuf,
    /// URL prefix under which stored menu files are served, e.g. `/uploads`.
    pub public_path: String,
    pub max_upload_bytes: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatProviderKind {
    Gemini,
    OpenAi,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_vision_model: String,
    pub gemini_chat_model: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub chat_provider: ChatProviderKind,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

pub fn generate_random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
