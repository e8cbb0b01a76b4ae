use std::future::Future;

use bytes::Bytes;

use crate::domain::{
    common::entities::app_errors::CoreError,
    menu::entities::MenuMediaType,
    menu_analysis::{
        entities::{AnalysisRecord, MenuStatus},
        value_objects::AnalyzeMenuInput,
    },
};

/// Turns a PDF's bytes into plain text
#[cfg_attr(test, mockall::automock)]
pub trait TextExtractor: Send + Sync {
    fn extract_text(
        &self,
        payload: Bytes,
    ) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;
}

/// Vision-capable model that transcribes an image.
///
/// Returns `Ok(None)` when the provider answered without any usable text.
#[cfg_attr(test, mockall::automock)]
pub trait VisionClient: Send + Sync {
    fn transcribe_image(
        &self,
        instruction: String,
        media_type: MenuMediaType,
        image_data: Bytes,
    ) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;
}

/// Service trait for menu analysis business logic
#[cfg_attr(test, mockall::automock)]
pub trait MenuAnalysisService: Send + Sync {
    fn analyze_menu(
        &self,
        input: AnalyzeMenuInput,
    ) -> impl Future<Output = Result<AnalysisRecord, CoreError>> + Send;

    fn get_menu_status(&self) -> impl Future<Output = Result<MenuStatus, CoreError>> + Send;

    fn get_menu_analysis(
        &self,
        menu_id: String,
    ) -> impl Future<Output = Result<AnalysisRecord, CoreError>> + Send;
}
