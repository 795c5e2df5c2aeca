//! Transport module
//!
//! The request/response seam the client talks through.
//!
//! # Features
//!
//! - **`Transport` trait**: one exchange per call, no operation semantics
//! - **`HttpTransport`**: reqwest with retries, backoff, and rate limiting
//! - **`ScriptedTransport`**: in-memory replay for tests and demos

mod http;
pub mod mock;
mod rate_limit;
mod types;

pub use http::{HttpTransport, HttpTransportConfig, HttpTransportConfigBuilder};
pub use mock::ScriptedTransport;
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use types::{RawRequest, RawResponse, Transport, TransportError};
