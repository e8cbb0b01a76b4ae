use std::sync::Arc;

use menuchat_core::application::MenuChatService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: MenuChatService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: MenuChatService) -> Self {
        Self { args, service }
    }
}
