//! Domain entities and wire encoding for zone rate-limiting rules.

#![forbid(unsafe_code)]

mod rate_limit;

pub use rate_limit::{
    ActionResponse, BypassEntry, MATCH_ALL, RateLimit, RateLimitAction, RequestMatcher,
    ResponseMatcher, TrafficMatcher,
};
