use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

use crate::application::http::server::app_state::AppState;

use super::handlers::{
    analyze_menu::{__path_analyze_menu, analyze_menu},
    check_menu_status::{__path_check_menu_status, check_menu_status},
    get_menu_analysis::{__path_get_menu_analysis, get_menu_analysis},
};

#[derive(OpenApi)]
#[openapi(paths(analyze_menu, check_menu_status, get_menu_analysis))]
pub struct MenuAnalysisApiDoc;

pub fn menu_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/analyze-menu", state.args.server.root_path),
            post(analyze_menu),
        )
        .route(
            &format!("{}/api/check-menu-status", state.args.server.root_path),
            get(check_menu_status),
        )
        .route(
            &format!(
                "{}/api/menus/{{menu_id}}/analysis",
                state.args.server.root_path
            ),
            get(get_menu_analysis),
        )
}
