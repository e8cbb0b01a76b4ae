use std::sync::Arc;

use crate::domain::{
    chat::{entities::SamplingOptions, ports::CompletionProvider},
    menu::ports::MenuStore,
    menu_analysis::ports::{TextExtractor, VisionClient},
};

/// Application service shared by every HTTP handler.
///
/// Generic over its ports so tests can swap in stubs for the store, the PDF
/// extractor and both model providers.
pub struct Service<MS, TE, VC, CP>
where
    MS: MenuStore,
    TE: TextExtractor,
    VC: VisionClient,
    CP: CompletionProvider,
{
    pub(crate) menu_store: Arc<MS>,
    pub(crate) text_extractor: Arc<TE>,
    pub(crate) vision_client: Arc<VC>,
    pub(crate) completion_provider: Arc<CP>,
    pub(crate) sampling: SamplingOptions,
    pub(crate) max_upload_bytes: usize,
}

impl<MS, TE, VC, CP> Service<MS, TE, VC, CP>
where
    MS: MenuStore,
    TE: TextExtractor,
    VC: VisionClient,
    CP: CompletionProvider,
{
    pub fn new(
        menu_store: MS,
        text_extractor: TE,
        vision_client: VC,
        completion_provider: CP,
        sampling: SamplingOptions,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            menu_store: Arc::new(menu_store),
            text_extractor: Arc::new(text_extractor),
            vision_client: Arc::new(vision_client),
            completion_provider: Arc::new(completion_provider),
            sampling,
            max_upload_bytes,
        }
    }
}

impl<MS, TE, VC, CP> Clone for Service<MS, TE, VC, CP>
where
    MS: MenuStore,
    TE: TextExtractor,
    VC: VisionClient,
    CP: CompletionProvider,
{
    fn clone(&self) -> Self {
        Self {
            menu_store: Arc::clone(&self.menu_store),
            text_extractor: Arc::clone(&self.text_extractor),
            vision_client: Arc::clone(&self.vision_client),
            completion_provider: Arc::clone(&self.completion_provider),
            sampling: self.sampling,
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}
