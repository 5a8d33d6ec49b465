//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::DispatchEngine;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Pricing, numbering and clock shared by every request
    pub engine: DispatchEngine,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(engine: DispatchEngine, config: AppConfig) -> Self {
        Self {
            engine,
            config: Arc::new(config),
        }
    }
}
