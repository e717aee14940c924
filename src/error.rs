//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required photoshoot parameters: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("Invalid array length: {0}")]
    InvalidItemCount(String),

    #[error("OpenAI API error: {0}")]
    AiProvider(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image generation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the error was caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_fields() {
        let err = Error::Validation(vec!["type", "style"]);
        assert_eq!(
            err.to_string(),
            "Missing required photoshoot parameters: type, style"
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn test_upstream_error_is_server_error() {
        let err = Error::AiProvider("400 content policy violation".to_string());
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("content policy violation"));
    }
}
