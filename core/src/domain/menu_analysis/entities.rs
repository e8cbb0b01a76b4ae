use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::menu::entities::UploadedMenuRecord;

pub const MENU_EXTRACTION_INSTRUCTION: &str = "This is a restaurant menu. Please extract all menu items, descriptions, pricing, and categories. Format the information clearly.";

pub const PDF_TEXT_PLACEHOLDER: &str = "Text could not be extracted from PDF.";

pub const IMAGE_TEXT_PLACEHOLDER: &str = "Image analysis failed.";

const UNKNOWN_ORIGINAL_NAME: &str = "Unknown";

const DEFAULT_MENU_NAME: &str = "Uploaded Menu";

/// Plain text extracted or transcribed from one menu file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub menu_id: Uuid,
    pub menu_url: String,
    pub original_name: String,
    pub mime_type: String,
    pub menu_content: String,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn new(menu: &UploadedMenuRecord, menu_content: String) -> Self {
        let original_name = if menu.original_name.trim().is_empty() {
            UNKNOWN_ORIGINAL_NAME.to_string()
        } else {
            menu.original_name.clone()
        };

        Self {
            menu_id: menu.menu_id,
            menu_url: menu.file_path.clone(),
            original_name,
            mime_type: menu.mime_type.clone(),
            menu_content,
            analyzed_at: Utc::now(),
        }
    }

    pub fn has_content(&self) -> bool {
        !self.menu_content.trim().is_empty()
    }

    pub fn menu_name(&self) -> &str {
        match self.original_name.trim() {
            "" | UNKNOWN_ORIGINAL_NAME => DEFAULT_MENU_NAME,
            name => name,
        }
    }
}

/// Outcome of asking an extraction capability for menu text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuText {
    Extracted(String),
    Missing,
}

impl MenuText {
    pub fn into_content(self, placeholder: &str) -> String {
        match self {
            MenuText::Extracted(text) => text,
            MenuText::Missing => placeholder.to_string(),
        }
    }
}

impl From<Option<String>> for MenuText {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(text) if !text.trim().is_empty() => MenuText::Extracted(text),
            _ => MenuText::Missing,
        }
    }
}

/// Whether a usable analysis is currently loaded. Faults are reported as
/// errors by the caller, never folded into `NotFound`.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuStatus {
    Found(AnalysisRecord),
    NotFound,
}
