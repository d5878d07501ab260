//! Main application state management

use std::sync::Arc;

use crate::store::SessionStore;

/// Shared state injected into every HTTP handler
pub struct AppState {
    /// Session persistence, behind the trait so tests can swap backends
    pub store: Arc<dyn SessionStore>,
    /// Duration applied when a create request omits one
    pub default_duration_seconds: i64,
}

impl AppState {
    /// Create a new AppState around a session store
    pub fn new(store: Arc<dyn SessionStore>, default_duration_seconds: i64) -> Self {
        Self {
            store,
            default_duration_seconds,
        }
    }
}
