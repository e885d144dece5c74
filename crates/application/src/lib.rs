//! Application services and ports.

#![forbid(unsafe_code)]

mod api_ports;
mod envelope;
mod rate_limit_service;

pub use api_ports::{ApiRequest, ApiResponse, ApiTransport, HttpMethod};
pub use envelope::{ApiEnvelope, PaginationOptions, ResultInfo, decode_envelope};
pub use rate_limit_service::{RateLimitPage, RateLimitService};
