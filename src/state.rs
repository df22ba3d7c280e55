use std::sync::Arc;

use crate::application::services::LinkService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// Storage backend name reported by the health check.
    pub storage: &'static str,
}
