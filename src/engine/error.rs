//! Engine error definitions.

use thiserror::Error;

/// Errors raised while a handler talks to its engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request body is not valid JSON for the target type.
    #[error("{0}")]
    Decode(#[source] serde_json::Error),

    /// A response value could not be encoded as JSON.
    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),

    /// No template is registered under this name.
    #[error("template not found: {0}")]
    TemplateNotFound(String),
}

/// Errors raised by a concrete server outside request handling.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind the listen address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Accept loop or connection I/O failed.
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A body could not be collected.
    #[error("failed to read body: {0}")]
    Body(String),
}
