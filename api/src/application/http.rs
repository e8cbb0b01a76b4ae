pub mod chat;
pub mod health;
pub mod menu;
pub mod menu_analysis;
pub mod server;
