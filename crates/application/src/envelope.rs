//! Decoding of the response envelope shared by every provider endpoint.

use edgeguard_core::{ApiErrorDetail, AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::api_ports::ApiResponse;

const BODY_PREVIEW_LIMIT: usize = 256;

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    /// Current page number, starting at 1.
    #[serde(default)]
    pub page: u32,
    /// Page size used by the server.
    #[serde(default)]
    pub per_page: u32,
    /// Number of items on this page.
    #[serde(default)]
    pub count: u32,
    /// Number of items across all pages.
    #[serde(default)]
    pub total_count: u32,
}

/// Page selection for list calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationOptions {
    /// Page number to fetch, starting at 1.
    pub page: Option<u32>,
    /// Number of items per page.
    pub per_page: Option<u32>,
}

impl PaginationOptions {
    /// Returns the query parameters for the selected page.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_owned(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".to_owned(), per_page.to_string()));
        }
        pairs
    }
}

/// Outer JSON wrapper common to all API responses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiEnvelope {
    /// Whether the server accepted the call.
    #[serde(default)]
    pub success: bool,
    /// Errors reported by the server, in order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<ApiErrorDetail>,
    /// Operation payload.
    #[serde(default)]
    pub result: Value,
    /// Pagination metadata for list calls.
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

impl ApiEnvelope {
    /// Fails with `AppError::Api` unless the server reported success.
    pub fn ensure_success(&self) -> AppResult<()> {
        if self.success {
            return Ok(());
        }

        Err(AppError::Api(self.errors.clone()))
    }

    /// Decodes `result` into `T` after checking the success flag.
    pub fn into_result<T: DeserializeOwned>(self) -> AppResult<T> {
        self.ensure_success()?;
        serde_json::from_value(self.result).map_err(|error| {
            AppError::Transport(format!("failed to decode response result: {error}"))
        })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ApiErrorDetail>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ApiErrorDetail>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses a raw response into an envelope.
///
/// A body that is not an envelope is a transport failure. A non-2xx status
/// with a well-formed envelope is reported as an API error even if the
/// envelope claims success.
pub fn decode_envelope(response: &ApiResponse) -> AppResult<ApiEnvelope> {
    let mut envelope = serde_json::from_slice::<ApiEnvelope>(&response.body).map_err(|error| {
        if response.is_success() {
            AppError::Transport(format!("failed to parse response envelope: {error}"))
        } else {
            AppError::Transport(format!(
                "server returned status {}: {}",
                response.status,
                body_preview(&response.body)
            ))
        }
    })?;

    if !response.is_success() && envelope.success {
        envelope.success = false;
    }
    if !envelope.success && envelope.errors.is_empty() {
        envelope.errors.push(ApiErrorDetail::new(
            i64::from(response.status),
            format!("server returned status {}", response.status),
        ));
    }

    Ok(envelope)
}

fn body_preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.trim().is_empty() {
        return "<empty body>".to_owned();
    }

    text.chars().take(BODY_PREVIEW_LIMIT).collect()
}
