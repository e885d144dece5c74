use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// One error or informational entry reported inside a provider envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// Provider error code. Zero when the server did not send one.
    #[serde(default)]
    pub code: i64,
    /// Message text, kept verbatim.
    #[serde(default)]
    pub message: String,
}

impl ApiErrorDetail {
    /// Creates an error detail from a code and message.
    #[must_use]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for ApiErrorDetail {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.code == 0 {
            write!(formatter, "{}", self.message)
        } else {
            write!(formatter, "{} ({})", self.message, self.code)
        }
    }
}

/// Joins server-reported errors into one line, preserving their order.
#[must_use]
pub fn join_error_details(details: &[ApiErrorDetail]) -> String {
    if details.is_empty() {
        return "request was not successful".to_owned();
    }

    details
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
