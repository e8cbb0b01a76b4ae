pub mod stream_chat;
pub mod stream_chat_events;
