use std::sync::Arc;

use platelens_core::application::PlatelensService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: PlatelensService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: PlatelensService) -> Self {
        Self { args, service }
    }
}
