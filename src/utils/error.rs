//! The `error` module defines the error type shared across `display-board`.
//!
//! Validation failures (`EmptyBody`, `InvalidId`) are client errors raised at
//! the HTTP and WebSocket boundaries. Everything else is a resource or
//! startup failure.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("message text must not be empty")]
    EmptyBody,

    #[error("invalid message id: {0:?}")]
    InvalidId(String),

    #[error("hub is not running")]
    HubClosed,

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Whether the error was caused by bad client input.
    pub fn is_validation(&self) -> bool {
        matches!(self, BoardError::EmptyBody | BoardError::InvalidId(_))
    }
}
