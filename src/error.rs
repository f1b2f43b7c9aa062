//! Error handling and custom error types
//!
//! Every failure in the analysis pipeline is an [`Error`]; callers that need
//! the coarse classification (for status codes or logs) use [`Error::kind`].

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    Input(String),

    #[error("Gemini API error: {status} - {body}")]
    Http { status: u16, body: String },

    #[error("Failed to reach Gemini API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse AI response: {0}")]
    Parse(String),

    #[error("AI response failed validation: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse failure classes reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigError,
    InputError,
    HttpError,
    ParseError,
    ValidationError,
    InternalError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ConfigError => "config_error",
            ErrorKind::InputError => "input_error",
            ErrorKind::HttpError => "http_error",
            ErrorKind::ParseError => "parse_error",
            ErrorKind::ValidationError => "validation_error",
            ErrorKind::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::ConfigError,
            Error::Input(_) => ErrorKind::InputError,
            // A timed-out or refused call is a transport failure just like a non-2xx.
            Error::Http { .. } | Error::Transport(_) => ErrorKind::HttpError,
            Error::Parse(_) => ErrorKind::ParseError,
            Error::Validation(_) => ErrorKind::ValidationError,
            Error::Internal(_) => ErrorKind::InternalError,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message_contains_status_and_body() {
        let err = Error::Http {
            status: 503,
            body: "{\"error\":\"overloaded\"}".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("overloaded"));
        assert_eq!(err.kind(), ErrorKind::HttpError);
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            Error::Config("missing".into()).kind(),
            ErrorKind::ConfigError
        );
        assert_eq!(Error::Input("no image".into()).kind(), ErrorKind::InputError);
        assert_eq!(Error::Parse("eof".into()).kind(), ErrorKind::ParseError);
        assert_eq!(
            Error::Validation("not a valid array".into()).kind(),
            ErrorKind::ValidationError
        );
        assert_eq!(
            Error::Internal("envelope".into()).kind(),
            ErrorKind::InternalError
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::ValidationError.to_string(), "validation_error");
    }
}
