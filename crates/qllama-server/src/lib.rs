//! Ollama-compatible HTTP facade over an external CLI assistant.

pub mod api;
pub mod config;

pub use api::{AppState, router};
pub use config::ServerConfig;
