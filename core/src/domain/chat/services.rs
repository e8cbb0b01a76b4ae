use tracing::instrument;

use crate::domain::{
    chat::{
        entities::{ChatMessage, CompletionRequest},
        ports::{ChatService, CompletionProvider, CompletionStream},
        prompt::{assign_message_ids, build_system_instruction, compose_conversation},
        value_objects::StreamChatInput,
    },
    common::{entities::app_errors::CoreError, services::Service},
    menu::ports::MenuStore,
    menu_analysis::{
        entities::AnalysisRecord,
        ports::{TextExtractor, VisionClient},
    },
};

impl<MS, TE, VC, CP> Service<MS, TE, VC, CP>
where
    MS: MenuStore,
    TE: TextExtractor,
    VC: VisionClient,
    CP: CompletionProvider,
{
    /// The analysis to ground the chat in. Chat keeps working in general mode
    /// when the analysis slot cannot be read.
    async fn grounding_analysis(&self) -> Option<AnalysisRecord> {
        match self.menu_store.latest_analysis().await {
            Ok(record) => record.filter(AnalysisRecord::has_content),
            Err(e) => {
                tracing::warn!(error = %e, "Menu analysis unavailable, chatting in general mode");
                None
            }
        }
    }

    async fn completion_request(&self, input: StreamChatInput) -> CompletionRequest {
        let analysis = self.grounding_analysis().await;

        tracing::debug!(
            grounded = analysis.is_some(),
            turns = input.messages.len(),
            "Building chat completion request"
        );

        CompletionRequest {
            system_instruction: build_system_instruction(analysis.as_ref()),
            history: assign_message_ids(input.messages),
            sampling: self.sampling,
        }
    }
}

impl<MS, TE, VC, CP> ChatService for Service<MS, TE, VC, CP>
where
    MS: MenuStore,
    TE: TextExtractor,
    VC: VisionClient,
    CP: CompletionProvider,
{
    async fn compose_conversation(
        &self,
        input: StreamChatInput,
    ) -> Result<Vec<ChatMessage>, CoreError> {
        let request = self.completion_request(input).await;

        Ok(compose_conversation(
            &request.system_instruction,
            &request.history,
        ))
    }

    #[instrument(skip(self, input), fields(turns = input.messages.len()))]
    async fn stream_chat(&self, input: StreamChatInput) -> Result<CompletionStream, CoreError> {
        let request = self.completion_request(input).await;

        self.completion_provider
            .stream_chat(request)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Chat completion failed"))
    }
}
