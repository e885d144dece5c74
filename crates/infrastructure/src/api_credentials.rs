use std::fmt::{Debug, Formatter};

use edgeguard_core::NonEmptyString;

/// Credentials injected into every provider API request.
#[derive(Clone)]
pub enum ApiCredentials {
    /// Scoped API token sent as a bearer token.
    Token(NonEmptyString),
    /// Global API key sent with the account email.
    Key {
        /// Global API key.
        key: NonEmptyString,
        /// Account email paired with the key.
        email: NonEmptyString,
    },
}

impl ApiCredentials {
    pub(crate) fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Token(token) => builder.bearer_auth(token.as_str()),
            Self::Key { key, email } => builder
                .header("X-Auth-Key", key.as_str())
                .header("X-Auth-Email", email.as_str()),
        }
    }

    /// Returns a short label for logs, never the secret itself.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Token(_) => "api_token",
            Self::Key { .. } => "api_key",
        }
    }
}

impl Debug for ApiCredentials {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(_) => formatter.write_str("ApiCredentials::Token(<redacted>)"),
            Self::Key { email, .. } => write!(
                formatter,
                "ApiCredentials::Key {{ key: <redacted>, email: {} }}",
                email.as_str()
            ),
        }
    }
}
