//! Application layer errors

use std::time::Duration;
use thiserror::Error;

/// Transport-level errors reported by a `Bot` implementation
#[derive(Error, Debug, Clone)]
pub enum BotError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Telegram API error {code}: {description}")]
    Api {
        code: i32,
        description: String,
        retry_after: Option<u64>,
    },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Outcome of a failed broadcast
#[derive(Error, Debug, Clone)]
pub enum DispatchError {
    #[error("Dispatch timed out after {0:?}")]
    Timeout(Duration),

    #[error("Destination rejected the message ({code}): {description}")]
    Rejected { code: i32, description: String },

    #[error("Transport failure: {0}")]
    Transport(String),
}

impl From<BotError> for DispatchError {
    fn from(err: BotError) -> Self {
        match err {
            BotError::Api { code, description, .. } => DispatchError::Rejected { code, description },
            BotError::Network(msg) | BotError::Parse(msg) => DispatchError::Transport(msg),
        }
    }
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Permission denied")]
    PermissionDenied,

    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_become_rejections() {
        let err = DispatchError::from(BotError::Api {
            code: 400,
            description: "Bad Request: chat not found".to_string(),
            retry_after: None,
        });
        assert!(matches!(err, DispatchError::Rejected { code: 400, .. }));

        let err = DispatchError::from(BotError::Network("connection reset".to_string()));
        assert!(matches!(err, DispatchError::Transport(_)));
    }
}
