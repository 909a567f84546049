//! The Exa API key.
//!
//! Held in a `secrecy::SecretString` so it stays out of logs and debug
//! output. A blank key is treated the same as a missing one.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{ExaError, Result};

/// Environment variable holding the Exa API key.
pub const API_KEY_ENV: &str = "EXA_API_KEY";

pub struct ApiKey(SecretString);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// Accepts a possibly-absent raw value, rejecting blanks.
    pub fn from_value(value: Option<String>) -> Result<Self> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(Self::new)
            .ok_or_else(Self::missing)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_value(std::env::var(API_KEY_ENV).ok())
    }

    /// The error reported when no usable key is configured.
    pub fn missing() -> ExaError {
        ExaError::Config(format!(
            "{} is missing. Add it to your environment.",
            API_KEY_ENV
        ))
    }

    /// Value for the `x-api-key` header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({} chars, redacted)", self.expose().chars().count())
    }
}
