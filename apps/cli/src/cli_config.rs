use std::env;
use std::time::Duration;

use edgeguard_core::{AppError, AppResult, NonEmptyString};
use edgeguard_infrastructure::{ApiCredentials, DEFAULT_API_BASE_URL, TransportConfig};

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub api_base_url: String,
    pub credentials: ApiCredentials,
    pub http_timeout_seconds: u64,
}

impl CliConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(|name| env::var(name).ok())
    }

    pub fn load_from<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("EDGEGUARD_API_BASE_URL")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();

        let credentials = match lookup("EDGEGUARD_API_TOKEN").filter(|value| !value.is_empty()) {
            Some(token) => ApiCredentials::Token(NonEmptyString::new(token)?),
            None => {
                let key = lookup("EDGEGUARD_API_KEY").ok_or_else(|| {
                    AppError::Validation(
                        "EDGEGUARD_API_TOKEN or EDGEGUARD_API_KEY is required".to_owned(),
                    )
                })?;
                let email = lookup("EDGEGUARD_API_EMAIL").ok_or_else(|| {
                    AppError::Validation(
                        "EDGEGUARD_API_EMAIL is required with EDGEGUARD_API_KEY".to_owned(),
                    )
                })?;
                ApiCredentials::Key {
                    key: NonEmptyString::new(key)?,
                    email: NonEmptyString::new(email)?,
                }
            }
        };

        let http_timeout_seconds = match lookup("EDGEGUARD_HTTP_TIMEOUT_SECONDS") {
            Some(value) => value.parse::<u64>().map_err(|error| {
                AppError::Validation(format!(
                    "invalid EDGEGUARD_HTTP_TIMEOUT_SECONDS value '{value}': {error}"
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        if http_timeout_seconds == 0 {
            return Err(AppError::Validation(
                "EDGEGUARD_HTTP_TIMEOUT_SECONDS must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            api_base_url,
            credentials,
            http_timeout_seconds,
        })
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            base_url: self.api_base_url.clone(),
            credentials: self.credentials.clone(),
            timeout: Duration::from_secs(self.http_timeout_seconds),
        }
    }
}
