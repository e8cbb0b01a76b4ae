use bytes::Bytes;

use crate::domain::{
    common::entities::app_errors::CoreError, menu_analysis::ports::TextExtractor,
};

/// PDF text extraction backed by `pdf-extract`.
///
/// Parsing is CPU bound and may panic on malformed documents, so it runs on
/// the blocking pool and a panic surfaces as an extraction error.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, payload: Bytes) -> Result<Option<String>, CoreError> {
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&payload))
            .await
            .map_err(|e| {
                tracing::error!("PDF extraction task failed: {}", e);
                CoreError::Extraction(format!("PDF extraction task failed: {}", e))
            })?
            .map_err(|e| {
                tracing::error!("PDF parse error: {}", e);
                CoreError::Extraction(format!("PDF parse error: {}", e))
            })?;

        Ok(Some(text))
    }
}
