//! Server configuration, read from the environment.

use std::time::Duration;

use qllama_core::CliInvoker;

/// HTTP server and backend configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (default: 127.0.0.1)
    pub host: String,
    /// Port to listen on (default: 11434, the Ollama port)
    pub port: u16,
    /// External CLI binary to invoke (default: q)
    pub bin: String,
    /// Identity of the single virtual model this server answers as
    pub model: String,
    /// Optional bound on buffered invocations, in seconds. Unset means an
    /// invocation runs until the CLI exits.
    pub timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let host = std::env::var("QLLAMA_HOST")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "127.0.0.1".to_string());

        let port = std::env::var("QLLAMA_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(11434);

        let bin = std::env::var("QLLAMA_BIN")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "q".to_string());

        let model = std::env::var("QLLAMA_MODEL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "amazon-q".to_string());

        let timeout_secs = std::env::var("QLLAMA_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse().ok());

        Self {
            host,
            port,
            bin,
            model,
            timeout_secs,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the invoker this configuration describes.
    pub fn invoker(&self) -> CliInvoker {
        let invoker = CliInvoker::new(&self.bin);
        match self.timeout_secs {
            Some(secs) => invoker.with_timeout(Duration::from_secs(secs)),
            None => invoker,
        }
    }
}
