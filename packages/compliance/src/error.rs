//! Typed errors for the compliance layer.
//!
//! Every provider failure is normalized into [`ComplianceError`] before it
//! leaves the gateway. Callers map these to their own transport codes.

use thiserror::Error;

/// Errors surfaced by the gateway and the agent.
#[derive(Debug, Error)]
pub enum ComplianceError {
    /// Missing or invalid provider credential
    #[error("{0}")]
    Config(String),

    /// The provider answered, but `results` was not a list
    #[error("Unexpected Exa {api} response format.")]
    UnexpectedResponseShape { api: &'static str },

    /// The provider body could not be parsed at all
    #[error("Exa returned an unreadable response. Re-check EXA_API_KEY and retry.")]
    UnreadableResponse,

    /// Network or provider-side failure
    #[error("{0}")]
    Provider(String),
}

impl ComplianceError {
    /// Whether a degraded request variant is worth trying after this error.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ComplianceError::Config(_))
    }
}

/// Result type alias for compliance operations.
pub type Result<T> = std::result::Result<T, ComplianceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_names_api() {
        let err = ComplianceError::UnexpectedResponseShape { api: "findSimilar" };
        assert_eq!(err.to_string(), "Unexpected Exa findSimilar response format.");
    }

    #[test]
    fn test_config_is_not_retryable() {
        assert!(!ComplianceError::Config("missing".into()).is_retryable());
        assert!(ComplianceError::Provider("timeout".into()).is_retryable());
        assert!(ComplianceError::UnreadableResponse.is_retryable());
    }
}
