use crate::{
    domain::{
        chat::entities::SamplingOptions,
        common::{
            ChatProviderKind, LLMConfig, MenuChatConfig, entities::app_errors::CoreError,
            services::Service,
        },
        menu::ports::MenuStore,
    },
    infrastructure::{
        extraction::PdfTextExtractor,
        llm::{ChatProvider, GeminiLLMClient, OpenAiClient},
        menu_store::FsMenuStore,
    },
};

pub type MenuChatService = Service<FsMenuStore, PdfTextExtractor, GeminiLLMClient, ChatProvider>;

fn required_key(key: &Option<String>, name: &str) -> Result<String, CoreError> {
    key.as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CoreError::InvalidConfiguration(format!("{name} is not defined!")))
}

fn chat_provider(llm: &LLMConfig) -> Result<ChatProvider, CoreError> {
    let provider = match llm.chat_provider {
        ChatProviderKind::Gemini => ChatProvider::Gemini(GeminiLLMClient::new(
            required_key(&llm.gemini_api_key, "GOOGLE_API_KEY")?,
            llm.gemini_base_url.clone(),
            llm.gemini_chat_model.clone(),
        )),
        ChatProviderKind::OpenAi => ChatProvider::OpenAi(OpenAiClient::new(
            required_key(&llm.openai_api_key, "OPENAI_API_KEY")?,
            llm.openai_base_url.clone(),
            llm.openai_model.clone(),
        )),
    };

    Ok(provider)
}

/// Wires the file store, the extraction clients and the configured chat
/// provider. Missing API keys are fatal here so the server never starts
/// half-configured.
pub async fn create_service(config: MenuChatConfig) -> Result<MenuChatService, CoreError> {
    let menu_store = FsMenuStore::new(
        config.storage.uploads_dir.clone(),
        config.storage.public_path.clone(),
    );
    menu_store.ensure_ready().await?;

    let vision_client = GeminiLLMClient::new(
        required_key(&config.llm.gemini_api_key, "GOOGLE_API_KEY")?,
        config.llm.gemini_base_url.clone(),
        config.llm.gemini_vision_model.clone(),
    );
    let completion_provider = chat_provider(&config.llm)?;

    tracing::info!(
        uploads_dir = %config.storage.uploads_dir.display(),
        chat_provider = completion_provider.name(),
        "Menu chat service ready"
    );

    Ok(Service::new(
        menu_store,
        PdfTextExtractor::new(),
        vision_client,
        completion_provider,
        SamplingOptions {
            temperature: config.llm.temperature,
            max_output_tokens: config.llm.max_output_tokens,
        },
        config.storage.max_upload_bytes,
    ))
}
