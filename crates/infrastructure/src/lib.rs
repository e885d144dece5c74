//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod api_credentials;
mod reqwest_api_transport;

pub use api_credentials::ApiCredentials;
pub use reqwest_api_transport::{DEFAULT_API_BASE_URL, ReqwestApiTransport, TransportConfig};
