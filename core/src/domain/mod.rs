pub mod chat;
pub mod common;
pub mod health;
pub mod menu;
pub mod menu_analysis;
