pub mod extraction;
pub mod llm;
pub mod menu_store;
