// src/errors.rs

use thiserror::Error;

/// Failure of the external generation service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("{kind}: {message}")]
    Api { kind: String, message: String },

    #[error("response missing expected content")]
    MissingContent,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("input is empty")]
    EmptyInput,

    #[error("message store is empty")]
    EmptyStore,

    #[error("generation failed: {0}")]
    Service(#[from] ServiceError),

    #[error("request superseded by a newer submission")]
    Superseded,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("logger error: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
}

impl ChatError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        ChatError::Config(msg.into())
    }

    pub fn clipboard_error(msg: impl Into<String>) -> Self {
        ChatError::Clipboard(msg.into())
    }
}

pub type ChatResult<T> = Result<T, ChatError>;
