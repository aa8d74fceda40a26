use std::sync::Arc;

use qllama_core::CliInvoker;

use crate::config::ServerConfig;

/// Application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Identity the server answers as; there is exactly one virtual model.
    pub model: String,
    pub invoker: Arc<CliInvoker>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            model: config.model.clone(),
            invoker: Arc::new(config.invoker()),
        }
    }
}
