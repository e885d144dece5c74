//! Shared primitives for all Rust crates in Edgeguard.

#![forbid(unsafe_code)]

/// Error entries reported by the provider API.
pub mod api_error;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use api_error::{ApiErrorDetail, join_error_details};

/// Result type used across Edgeguard crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common error categories surfaced by the API client.
#[derive(Debug, Error)]
pub enum AppError {
    /// The HTTP exchange failed or the response body could not be parsed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with `success: false`.
    #[error("api error: {}", join_error_details(.0))]
    Api(Vec<ApiErrorDetail>),

    /// Invalid local input such as configuration or command-line values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the server-reported errors when this is an API error.
    #[must_use]
    pub fn api_errors(&self) -> &[ApiErrorDetail] {
        match self {
            Self::Api(details) => details.as_slice(),
            _ => &[],
        }
    }
}
