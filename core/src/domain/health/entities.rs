use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StoreHealthStatus {
    pub status: String,
    /// Whether an analyzed menu is currently loaded
    pub menu_loaded: bool,
}
