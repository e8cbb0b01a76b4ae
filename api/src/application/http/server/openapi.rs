use utoipa::OpenApi;

use crate::application::http::{
    chat::router::ChatApiDoc, health::router::HealthApiDoc, menu::router::MenuApiDoc,
    menu_analysis::router::MenuAnalysisApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MenuChat API"
    ),
    nest(
        (path = "/api", api = MenuApiDoc),
        (path = "/api", api = MenuAnalysisApiDoc),
        (path = "/api", api = ChatApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
