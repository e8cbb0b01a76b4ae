use crate::domain::{
    chat::{
        entities::{ChatMessage, ChatRole},
        value_objects::ChatTurnInput,
    },
    common::generate_random_string,
    menu_analysis::entities::AnalysisRecord,
};

const MESSAGE_ID_LENGTH: usize = 13;

pub fn generate_message_id() -> String {
    generate_random_string(MESSAGE_ID_LENGTH)
}

/// System instruction for the assistant, grounded in the analyzed menu when
/// there is one.
pub fn build_system_instruction(analysis: Option<&AnalysisRecord>) -> String {
    match analysis {
        Some(record) => format!(
            "You are an AI assistant for restaurant and on-board dining menus.\n\
             Here is the menu content that was uploaded and analyzed:\n\
             \n\
             {content}\n\
             \n\
             Menu Name: {name}\n\
             Analyzed: {analyzed_at}\n\
             \n\
             Answer user questions about this menu specifically. Be helpful with details about food items, \
             ingredients, dietary options, and allergens. If you don't know certain information that's not \
             in the menu, acknowledge that limitation politely.\n\
             \n\
             Detect the language the user is using and respond in the same language.\n\
             Format your responses using Markdown for better readability.",
            content = record.menu_content,
            name = record.menu_name(),
            analyzed_at = record.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC"),
        ),
        None => "You are an AI assistant designed to provide information exclusively about restaurant and on-board dining menus. \
                 Your role is to answer questions related to meal options, ingredients, dietary preferences \
                 (e.g., vegetarian, vegan, gluten-free), allergens, and beverage selections.\n\
                 \n\
                 No menu has been uploaded yet. Tell the user they need to upload a menu first to get specific \
                 information, and help them only with general questions about dining options until then.\n\
                 \n\
                 Detect the language the user uses and give answers in that language.\n\
                 Format your responses using Markdown, utilizing **bold**, *italics*, lists, and other Markdown features for clarity."
            .to_string(),
    }
}

/// Caller turns in order, with an id assigned to every turn missing one.
pub fn assign_message_ids(turns: Vec<ChatTurnInput>) -> Vec<ChatMessage> {
    turns
        .into_iter()
        .map(|turn| ChatMessage {
            id: turn
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(generate_message_id),
            role: turn.role,
            content: turn.content,
        })
        .collect()
}

/// The full sequence sent to a provider: system message first, then history.
pub fn compose_conversation(system_instruction: &str, history: &[ChatMessage]) -> Vec<ChatMessage> {
    std::iter::once(ChatMessage {
        id: generate_message_id(),
        role: ChatRole::System,
        content: system_instruction.to_string(),
    })
    .chain(history.iter().cloned())
    .collect()
}
