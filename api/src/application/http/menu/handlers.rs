pub mod upload_menu;
