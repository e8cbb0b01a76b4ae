use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use menuchat_core::{
    domain::common::{ChatProviderKind, LLMConfig, MenuChatConfig, StorageConfig},
    infrastructure::llm::{gemini_client::DEFAULT_GEMINI_BASE_URL, openai_client::DEFAULT_OPENAI_BASE_URL},
};

#[derive(Debug, Clone, Parser)]
#[command(name = "menuchat-api", version, about = "Menu upload, analysis and chat server")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServerArgs {
    #[arg(
        long = "server-allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    /// Expose Prometheus metrics on `/metrics`
    #[arg(
        long = "server-metrics",
        env = "SERVER_METRICS",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub metrics: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct StorageArgs {
    #[arg(long = "uploads-dir", env = "UPLOADS_DIR", default_value = "public/uploads")]
    pub uploads_dir: PathBuf,

    #[arg(long = "uploads-public-path", env = "UPLOADS_PUBLIC_PATH", default_value = "/uploads")]
    pub public_path: String,

    #[arg(
        long = "max-upload-bytes",
        env = "MAX_UPLOAD_BYTES",
        default_value_t = 20 * 1024 * 1024
    )]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChatProviderArg {
    Gemini,
    Openai,
}

impl From<ChatProviderArg> for ChatProviderKind {
    fn from(value: ChatProviderArg) -> Self {
        match value {
            ChatProviderArg::Gemini => ChatProviderKind::Gemini,
            ChatProviderArg::Openai => ChatProviderKind::OpenAi,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct LlmArgs {
    #[arg(long = "google-api-key", env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long = "gemini-base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    #[arg(
        long = "gemini-vision-model",
        env = "GEMINI_VISION_MODEL",
        default_value = "gemini-1.5-flash"
    )]
    pub gemini_vision_model: String,

    #[arg(
        long = "gemini-chat-model",
        env = "GEMINI_CHAT_MODEL",
        default_value = "gemini-1.5-pro-latest"
    )]
    pub gemini_chat_model: String,

    #[arg(long = "openai-api-key", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long = "openai-base-url", env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long = "openai-model", env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub openai_model: String,

    #[arg(
        long = "chat-provider",
        env = "CHAT_PROVIDER",
        value_enum,
        default_value_t = ChatProviderArg::Gemini
    )]
    pub chat_provider: ChatProviderArg,

    #[arg(long = "llm-temperature", env = "LLM_TEMPERATURE", default_value_t = 0.7)]
    pub temperature: f32,

    #[arg(
        long = "llm-max-output-tokens",
        env = "LLM_MAX_OUTPUT_TOKENS",
        default_value_t = 2048
    )]
    pub max_output_tokens: u32,
}

impl From<Args> for MenuChatConfig {
    fn from(args: Args) -> Self {
        MenuChatConfig {
            storage: StorageConfig {
                uploads_dir: args.storage.uploads_dir,
                public_path: args.storage.public_path,
                max_upload_bytes: args.storage.max_upload_bytes,
            },
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_base_url: args.llm.gemini_base_url,
                gemini_vision_model: args.llm.gemini_vision_model,
                gemini_chat_model: args.llm.gemini_chat_model,
                openai_api_key: args.llm.openai_api_key,
                openai_base_url: args.llm.openai_base_url,
                openai_model: args.llm.openai_model,
                chat_provider: args.llm.chat_provider.into(),
                temperature: args.llm.temperature,
                max_output_tokens: args.llm.max_output_tokens,
            },
        }
    }
}
