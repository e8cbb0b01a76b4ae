use menuchat_core::domain::chat::{
    entities::ChatRole,
    value_objects::{ChatTurnInput, StreamChatInput},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessageValidator {
    #[serde(default)]
    pub id: Option<String>,
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChatRequestValidator {
    #[validate(length(min = 1, message = "messages cannot be empty"))]
    pub messages: Vec<ChatMessageValidator>,
}

impl From<ChatRequestValidator> for StreamChatInput {
    fn from(payload: ChatRequestValidator) -> Self {
        StreamChatInput {
            messages: payload
                .messages
                .into_iter()
                .map(|message| ChatTurnInput {
                    id: message.id,
                    role: message.role,
                    content: message.content,
                })
                .collect(),
        }
    }
}
