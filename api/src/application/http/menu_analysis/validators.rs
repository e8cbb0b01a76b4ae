use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeMenuValidator {
    /// Menu to analyze; the latest upload is used when absent or blank
    #[serde(default)]
    #[validate(length(max = 64, message = "menuId is too long"))]
    pub menu_id: Option<String>,
}

impl AnalyzeMenuValidator {
    pub fn menu_id(&self) -> Option<String> {
        self.menu_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }
}
