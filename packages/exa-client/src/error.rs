//! Error types for the Exa client.

use serde_json::error::Category;
use thiserror::Error;

/// Result type for Exa client operations.
pub type Result<T> = std::result::Result<T, ExaError>;

/// Exa client errors.
#[derive(Debug, Error)]
pub enum ExaError {
    /// Configuration error (missing API key, invalid settings)
    #[error("{0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit, invalid request)
    #[error("Exa API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not valid JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ExaError {
    /// True when the provider returned a body that could not be read as JSON
    /// at all (bad escapes, truncated strings, unexpected tokens).
    pub fn is_unreadable(&self) -> bool {
        match self {
            ExaError::Parse(e) => matches!(e.classify(), Category::Syntax | Category::Eof),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_errors_are_unreadable() {
        let err: ExaError = serde_json::from_str::<serde_json::Value>(r#"{"a": "\uZZZZ"}"#)
            .unwrap_err()
            .into();
        assert!(err.is_unreadable());

        let truncated: ExaError = serde_json::from_str::<serde_json::Value>(r#"{"a": "unterminated"#)
            .unwrap_err()
            .into();
        assert!(truncated.is_unreadable());
    }

    #[test]
    fn test_other_errors_are_not_unreadable() {
        assert!(!ExaError::Network("connection reset".into()).is_unreadable());
        assert!(!ExaError::Api {
            status: 500,
            message: "boom".into()
        }
        .is_unreadable());
    }

    #[test]
    fn test_config_message_is_verbatim() {
        let err = ExaError::Config("EXA_API_KEY is missing. Add it to your environment.".into());
        assert_eq!(
            err.to_string(),
            "EXA_API_KEY is missing. Add it to your environment."
        );
    }
}
