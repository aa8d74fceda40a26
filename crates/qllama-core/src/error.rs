//! Error types for the translation layer

use thiserror::Error;

/// Failures raised while turning an API request into a CLI invocation.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The request itself is unusable; never reaches the CLI. Maps to 400.
    #[error("{0}")]
    Validation(String),

    /// The CLI binary could not be started or its stdout could not be piped.
    #[error("failed to start '{bin}': {source}")]
    SpawnFailed {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    /// The CLI ran but exited non-zero. Carries the captured output verbatim
    /// so callers can see what the tool printed before dying.
    #[error("'{bin}' failed with exit code {code}: {output}")]
    CommandFailed {
        bin: String,
        code: i32,
        output: String,
    },

    /// A configured execution deadline elapsed before the CLI exited.
    #[error("'{bin}' timed out after {secs} seconds")]
    Timeout { bin: String, secs: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Request-validation failures are client errors; everything else is a
    /// server-side invocation failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

/// Result type alias for translation-layer operations
pub type Result<T> = std::result::Result<T, CoreError>;
