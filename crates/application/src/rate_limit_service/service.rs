use std::sync::Arc;

use edgeguard_core::{AppError, AppResult};
use edgeguard_domain::RateLimit;
use serde_json::Value;

use crate::api_ports::{ApiRequest, ApiTransport, HttpMethod};
use crate::envelope::{ApiEnvelope, PaginationOptions, ResultInfo, decode_envelope};

/// One page of rules together with the server's pagination metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitPage {
    /// Rules in server order.
    pub rules: Vec<RateLimit>,
    /// Pagination metadata, defaulted when the server omits it.
    pub result_info: ResultInfo,
}

/// Application service for zone rate-limiting rules.
#[derive(Clone)]
pub struct RateLimitService {
    transport: Arc<dyn ApiTransport>,
}

impl RateLimitService {
    /// Creates a new rate limit service.
    #[must_use]
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Lists the rules of a zone as returned on the first page.
    pub async fn list_rate_limits(&self, zone_id: &str) -> AppResult<Vec<RateLimit>> {
        let envelope = self
            .call(ApiRequest::new(HttpMethod::Get, collection_path(zone_id)))
            .await?;

        let rules: Option<Vec<RateLimit>> = envelope.into_result()?;
        Ok(rules.unwrap_or_default())
    }

    /// Lists one page of the rules of a zone.
    pub async fn list_rate_limits_page(
        &self,
        zone_id: &str,
        options: &PaginationOptions,
    ) -> AppResult<RateLimitPage> {
        let request = options.query_pairs().into_iter().fold(
            ApiRequest::new(HttpMethod::Get, collection_path(zone_id)),
            |request, (name, value)| request.with_query(name, value),
        );
        let envelope = self.call(request).await?;

        let result_info = envelope.result_info.unwrap_or_default();
        let rules: Option<Vec<RateLimit>> = envelope.into_result()?;
        Ok(RateLimitPage {
            rules: rules.unwrap_or_default(),
            result_info,
        })
    }

    /// Fetches one rule.
    pub async fn rate_limit(&self, zone_id: &str, rule_id: &str) -> AppResult<RateLimit> {
        self.call(ApiRequest::new(HttpMethod::Get, rule_path(zone_id, rule_id)))
            .await?
            .into_result()
    }

    /// Creates a rule and returns it with its server-assigned identifier.
    pub async fn create_rate_limit(&self, zone_id: &str, rule: &RateLimit) -> AppResult<RateLimit> {
        let request =
            ApiRequest::new(HttpMethod::Post, collection_path(zone_id)).with_body(encode(rule)?);

        self.call(request).await?.into_result()
    }

    /// Replaces a rule and returns it as stored.
    pub async fn update_rate_limit(
        &self,
        zone_id: &str,
        rule_id: &str,
        rule: &RateLimit,
    ) -> AppResult<RateLimit> {
        let request =
            ApiRequest::new(HttpMethod::Put, rule_path(zone_id, rule_id)).with_body(encode(rule)?);

        self.call(request).await?.into_result()
    }

    /// Deletes a rule.
    pub async fn delete_rate_limit(&self, zone_id: &str, rule_id: &str) -> AppResult<()> {
        self.call(ApiRequest::new(HttpMethod::Delete, rule_path(zone_id, rule_id)))
            .await?
            .ensure_success()
    }

    async fn call(&self, request: ApiRequest) -> AppResult<ApiEnvelope> {
        let response = self.transport.send(request).await?;
        decode_envelope(&response)
    }
}

fn collection_path(zone_id: &str) -> String {
    format!("/zones/{zone_id}/rate_limits")
}

fn rule_path(zone_id: &str, rule_id: &str) -> String {
    format!("/zones/{zone_id}/rate_limits/{rule_id}")
}

fn encode(rule: &RateLimit) -> AppResult<Value> {
    serde_json::to_value(rule)
        .map_err(|error| AppError::Internal(format!("failed to encode rate limit: {error}")))
}
