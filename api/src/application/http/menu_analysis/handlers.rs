pub mod analyze_menu;
pub mod check_menu_status;
pub mod get_menu_analysis;
