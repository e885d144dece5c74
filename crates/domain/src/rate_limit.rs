use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel accepted by the provider in `methods` and `schemes` to match every value.
pub const MATCH_ALL: &str = "_ALL_";

/// Decodes an explicit JSON `null` the same way as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A zone rate-limiting rule as stored by the provider.
///
/// `id` is empty on values built for a create request and populated on every
/// value decoded from a server response. `threshold` and `period` are sent
/// as-is; the provider owns their validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    /// Server-assigned rule identifier.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,
    /// Whether the rule is switched off.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub disabled: bool,
    /// Free-text description.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
    /// Traffic the rule counts.
    #[serde(default, deserialize_with = "null_as_default", rename = "match")]
    pub traffic_match: TrafficMatcher,
    /// Exemptions excluded from matching.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub bypass: Vec<BypassEntry>,
    /// Number of matching requests that triggers the action.
    #[serde(default, deserialize_with = "null_as_default")]
    pub threshold: u32,
    /// Window in seconds over which `threshold` is evaluated.
    #[serde(default, deserialize_with = "null_as_default")]
    pub period: u32,
    /// Action applied once the threshold is exceeded.
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: RateLimitAction,
}

impl RateLimit {
    /// Returns whether the rule carries a server-assigned identifier.
    #[must_use]
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Request and response conditions of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficMatcher {
    /// Request-side conditions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub request: RequestMatcher,
    /// Response-side conditions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: ResponseMatcher,
}

/// Request-side conditions of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMatcher {
    /// HTTP methods to match, or [`MATCH_ALL`].
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
    /// URL schemes to match, or [`MATCH_ALL`].
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    /// URL pattern; `*` wildcards are interpreted by the provider.
    #[serde(default, deserialize_with = "null_as_default", rename = "url")]
    pub url_pattern: String,
}

impl RequestMatcher {
    /// Matches every method and scheme for the given URL pattern.
    #[must_use]
    pub fn all_traffic(url_pattern: impl Into<String>) -> Self {
        Self {
            methods: vec![MATCH_ALL.to_owned()],
            schemes: vec![MATCH_ALL.to_owned()],
            url_pattern: url_pattern.into(),
        }
    }

    /// Returns whether the method list is the match-all sentinel.
    #[must_use]
    pub fn matches_all_methods(&self) -> bool {
        is_match_all(&self.methods)
    }

    /// Returns whether the scheme list is the match-all sentinel.
    #[must_use]
    pub fn matches_all_schemes(&self) -> bool {
        is_match_all(&self.schemes)
    }
}

fn is_match_all(values: &[String]) -> bool {
    values.iter().any(|value| value == MATCH_ALL)
}

/// Response-side conditions of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMatcher {
    /// Count responses forwarded from the origin rather than served from cache.
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin_traffic: bool,
    /// Only count responses with these status codes.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<u16>,
}

/// Action taken when a rule's threshold is exceeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitAction {
    /// Action mode, for example `ban`, `simulate` or `challenge`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub mode: String,
    /// Seconds the action stays in effect once triggered.
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeout: u32,
    /// Custom response served while the action is in effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ActionResponse>,
}

/// Response override served by a triggered action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    /// Content type of `body`, for example `text/plain`.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub content_type: String,
    /// Response body.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub body: String,
}

/// One bypass exemption, for example `{ "name": "url", "value": "example.com/*" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BypassEntry {
    /// Exemption kind.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Exemption value.
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::{Value, json};

    use super::{
        ActionResponse, BypassEntry, MATCH_ALL, RateLimit, RateLimitAction, RequestMatcher,
        ResponseMatcher, TrafficMatcher,
    };

    fn server_rule() -> Value {
        json!({
            "id": "72dae2fc158942f2adb1dd2a3d4143bc",
            "disabled": false,
            "description": "test",
            "match": {
                "request": {
                    "methods": ["_ALL_"],
                    "schemes": ["_ALL_"],
                    "url": "exampledomain.com/test-rate-limit"
                },
                "response": { "origin_traffic": true }
            },
            "login_protect": false,
            "threshold": 50,
            "period": 1,
            "action": { "mode": "ban", "timeout": 60 }
        })
    }

    fn expected_rule() -> RateLimit {
        RateLimit {
            id: "72dae2fc158942f2adb1dd2a3d4143bc".to_owned(),
            disabled: false,
            description: "test".to_owned(),
            traffic_match: TrafficMatcher {
                request: RequestMatcher::all_traffic("exampledomain.com/test-rate-limit"),
                response: ResponseMatcher {
                    origin_traffic: true,
                    status: Vec::new(),
                },
            },
            bypass: Vec::new(),
            threshold: 50,
            period: 1,
            action: RateLimitAction {
                mode: "ban".to_owned(),
                timeout: 60,
                response: None,
            },
        }
    }

    #[test]
    fn server_rule_decodes_into_typed_record() -> Result<(), serde_json::Error> {
        let rule: RateLimit = serde_json::from_value(server_rule())?;
        assert_eq!(rule, expected_rule());
        assert!(rule.has_id());
        assert!(rule.traffic_match.request.matches_all_methods());
        assert!(rule.traffic_match.request.matches_all_schemes());
        Ok(())
    }

    #[test]
    fn decoded_rule_encodes_back_to_the_same_fields() -> Result<(), serde_json::Error> {
        let rule: RateLimit = serde_json::from_value(server_rule())?;
        let encoded = serde_json::to_value(&rule)?;

        let mut expected = server_rule();
        if let Some(object) = expected.as_object_mut() {
            // Not part of the typed record; `disabled: false` is omitted on encode.
            object.remove("login_protect");
            object.remove("disabled");
        }

        assert_eq!(encoded, expected);
        Ok(())
    }

    #[test]
    fn create_request_omits_id_and_keeps_zero_counters() -> Result<(), serde_json::Error> {
        let rule = RateLimit {
            description: "test".to_owned(),
            traffic_match: TrafficMatcher {
                request: RequestMatcher {
                    url_pattern: "exampledomain.com/test-rate-limit".to_owned(),
                    ..RequestMatcher::default()
                },
                ..TrafficMatcher::default()
            },
            action: RateLimitAction {
                mode: "ban".to_owned(),
                timeout: 60,
                response: None,
            },
            ..RateLimit::default()
        };

        let encoded = serde_json::to_value(&rule)?;
        assert!(encoded.get("id").is_none());
        assert_eq!(encoded["threshold"], json!(0));
        assert_eq!(encoded["period"], json!(0));
        assert!(encoded["match"]["request"].get("methods").is_none());
        assert_eq!(
            encoded["match"]["request"]["url"],
            json!("exampledomain.com/test-rate-limit")
        );
        Ok(())
    }

    #[test]
    fn bypass_and_action_response_use_provider_field_names() -> Result<(), serde_json::Error> {
        let rule = RateLimit {
            bypass: vec![BypassEntry {
                name: "url".to_owned(),
                value: "api.example.com/health".to_owned(),
            }],
            action: RateLimitAction {
                mode: "simulate".to_owned(),
                timeout: 3600,
                response: Some(ActionResponse {
                    content_type: "text/plain".to_owned(),
                    body: "slow down".to_owned(),
                }),
            },
            ..RateLimit::default()
        };

        let encoded = serde_json::to_value(&rule)?;
        assert_eq!(
            encoded["bypass"],
            json!([{ "name": "url", "value": "api.example.com/health" }])
        );
        assert_eq!(
            encoded["action"]["response"],
            json!({ "content_type": "text/plain", "body": "slow down" })
        );
        Ok(())
    }

    #[test]
    fn null_fields_decode_as_defaults() -> Result<(), serde_json::Error> {
        let rule: RateLimit = serde_json::from_value(json!({
            "id": "72dae2fc158942f2adb1dd2a3d4143bc",
            "disabled": null,
            "description": null,
            "match": {
                "request": { "methods": null, "schemes": null, "url": null },
                "response": { "origin_traffic": null, "status": null }
            },
            "bypass": null,
            "threshold": null,
            "period": 1,
            "action": { "mode": null, "timeout": 60, "response": null }
        }))?;

        assert_eq!(rule.id, "72dae2fc158942f2adb1dd2a3d4143bc");
        assert!(rule.description.is_empty());
        assert!(rule.traffic_match.request.methods.is_empty());
        assert!(rule.traffic_match.request.schemes.is_empty());
        assert!(rule.traffic_match.request.url_pattern.is_empty());
        assert!(rule.traffic_match.response.status.is_empty());
        assert!(rule.bypass.is_empty());
        assert_eq!(rule.threshold, 0);
        assert_eq!(rule.period, 1);
        assert!(rule.action.mode.is_empty());
        assert_eq!(rule.action.response, None);
        Ok(())
    }

    #[test]
    fn server_rule_with_bypass_and_action_response_decodes() -> Result<(), serde_json::Error> {
        let mut server = server_rule();
        server["bypass"] = json!([
            { "name": "url", "value": "api.example.com/health" },
            { "name": "url", "value": "api.example.com/status" }
        ]);
        server["action"] = json!({
            "mode": "simulate",
            "timeout": 3600,
            "response": { "content_type": "text/plain", "body": "slow down" }
        });

        let rule: RateLimit = serde_json::from_value(server)?;

        assert_eq!(
            rule.bypass,
            vec![
                BypassEntry {
                    name: "url".to_owned(),
                    value: "api.example.com/health".to_owned(),
                },
                BypassEntry {
                    name: "url".to_owned(),
                    value: "api.example.com/status".to_owned(),
                },
            ]
        );
        assert_eq!(
            rule.action,
            RateLimitAction {
                mode: "simulate".to_owned(),
                timeout: 3600,
                response: Some(ActionResponse {
                    content_type: "text/plain".to_owned(),
                    body: "slow down".to_owned(),
                }),
            }
        );
        Ok(())
    }

    #[test]
    fn match_all_sentinel_stays_a_literal_string() -> Result<(), serde_json::Error> {
        let matcher = RequestMatcher::all_traffic("*.example.com/*");
        let encoded = serde_json::to_value(&matcher)?;
        assert_eq!(encoded["methods"], json!([MATCH_ALL]));
        assert_eq!(encoded["schemes"], json!(["_ALL_"]));
        Ok(())
    }

    proptest! {
        #[test]
        fn method_and_scheme_order_survives_encoding(
            methods in proptest::collection::vec("[A-Z]{3,7}", 0..6),
            schemes in proptest::collection::vec("https?", 0..3),
        ) {
            let matcher = RequestMatcher {
                methods: methods.clone(),
                schemes: schemes.clone(),
                url_pattern: "example.com/*".to_owned(),
            };

            let encoded = serde_json::to_string(&matcher)
                .map_err(|error| TestCaseError::fail(error.to_string()))?;
            let decoded: RequestMatcher = serde_json::from_str(&encoded)
                .map_err(|error| TestCaseError::fail(error.to_string()))?;

            prop_assert_eq!(decoded.methods, methods);
            prop_assert_eq!(decoded.schemes, schemes);
        }
    }
}
