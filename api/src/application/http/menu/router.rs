use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

use crate::application::http::server::app_state::AppState;

use super::handlers::upload_menu::{__path_upload_menu, upload_menu};

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(paths(upload_menu))]
pub struct MenuApiDoc;

pub fn menu_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/upload-menu", state.args.server.root_path),
            post(upload_menu),
        )
        .layer(DefaultBodyLimit::max(
            state.args.storage.max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
        ))
}
