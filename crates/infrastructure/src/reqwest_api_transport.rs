//! reqwest-backed implementation of the provider API transport.

use std::time::Duration;

use async_trait::async_trait;
use edgeguard_application::{ApiRequest, ApiResponse, ApiTransport, HttpMethod};
use edgeguard_core::{AppError, AppResult};
use tracing::{debug, warn};
use url::Url;

use crate::ApiCredentials;

/// Base URL of the provider's client API v4.
pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

const DEFAULT_USER_AGENT: &str = concat!("edgeguard/", env!("CARGO_PKG_VERSION"));

/// Settings used to build a [`ReqwestApiTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// API base URL without a trailing slash.
    pub base_url: String,
    /// Credentials injected into every request.
    pub credentials: ApiCredentials,
    /// Whole-request timeout.
    pub timeout: Duration,
}

/// HTTP transport for provider API calls.
#[derive(Debug, Clone)]
pub struct ReqwestApiTransport {
    http_client: reqwest::Client,
    base_url: String,
    credentials: ApiCredentials,
}

impl ReqwestApiTransport {
    /// Creates a transport around an existing HTTP client.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        credentials: ApiCredentials,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            credentials,
        }
    }

    /// Builds an HTTP client from configuration and wraps it.
    pub fn from_config(config: &TransportConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        Ok(Self::new(
            http_client,
            config.base_url.as_str(),
            config.credentials.clone(),
        ))
    }

    fn endpoint(&self, request: &ApiRequest) -> AppResult<Url> {
        let raw = format!("{}{}", self.base_url, request.path);
        let mut url = Url::parse(raw.as_str()).map_err(|error| {
            AppError::Transport(format!("invalid request URL '{raw}': {error}"))
        })?;

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            );
        }

        Ok(url)
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl ApiTransport for ReqwestApiTransport {
    async fn send(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let url = self.endpoint(&request)?;
        debug!(
            method = %request.method,
            path = %request.path,
            credentials = self.credentials.kind(),
            "sending provider API request"
        );

        let mut builder = self
            .credentials
            .apply(self.http_client.request(reqwest_method(request.method), url));
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|error| {
            warn!(
                method = %request.method,
                path = %request.path,
                error = %error,
                "provider API request failed"
            );
            AppError::Transport(format!(
                "{} {} failed: {error}",
                request.method, request.path
            ))
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|error| {
            AppError::Transport(format!(
                "failed to read response body for {} {}: {error}",
                request.method, request.path
            ))
        })?;

        if (200..300).contains(&status) {
            debug!(method = %request.method, path = %request.path, status, "provider API responded");
        } else {
            warn!(method = %request.method, path = %request.path, status, "provider API returned error status");
        }

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}
