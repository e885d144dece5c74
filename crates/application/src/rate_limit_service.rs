//! Zone rate-limiting rule resource.
//!
//! Every operation is one call through the injected [`ApiTransport`]; no
//! state is kept between calls and rule fields are sent without local
//! validation.
//!
//! [`ApiTransport`]: crate::ApiTransport

mod service;


pub use service::{RateLimitPage, RateLimitService};
