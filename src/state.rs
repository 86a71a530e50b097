//! Shared application state for the builder routes.

use crate::service::ApiBuilderService;

#[derive(Clone)]
pub struct AppState {
    pub service: ApiBuilderService,
}

impl AppState {
    pub fn new(service: ApiBuilderService) -> Self {
        AppState { service }
    }
}
