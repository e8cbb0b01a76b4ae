use crate::domain::chat::entities::ChatRole;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurnInput {
    pub id: Option<String>,
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamChatInput {
    pub messages: Vec<ChatTurnInput>,
}
