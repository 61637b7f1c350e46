//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, PurgeService};
use crate::infrastructure::cache::PageCache;

#[derive(Clone)]
pub struct AppState {
    pub purge_service: Arc<PurgeService>,
    pub auth_service: Arc<AuthService>,
    pub page_cache: Arc<dyn PageCache>,
}

impl AppState {
    pub fn new(
        purge_service: Arc<PurgeService>,
        auth_service: Arc<AuthService>,
        page_cache: Arc<dyn PageCache>,
    ) -> Self {
        Self {
            purge_service,
            auth_service,
            page_cache,
        }
    }
}
