//! Translation layer between the Ollama HTTP protocol and an external CLI
//! assistant: wire types, attachment staging, process invocation and response
//! assembly. The HTTP surface lives in `qllama-server`.

pub mod error;
pub mod invoker;
pub mod models;
pub mod staging;
pub mod turns;

pub use error::{CoreError, Result};
pub use invoker::{CliInvoker, StreamedInvocation};
pub use staging::StagedAttachments;
