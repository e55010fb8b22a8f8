//! HTTP client for the student service
//!
//! - `transport`: request description and the reqwest-backed sender
//! - `envelope`: `{success, message?, ...}` decoding
//! - `client`: one typed method per endpoint
//! - `error`: transport-level failures

mod client;
mod envelope;
mod error;
mod transport;

pub use client::StudentApi;
pub use envelope::{Ack, Outcome};
pub use error::ApiError;
pub use transport::{HttpTransport, Transport};

#[cfg(test)]
pub use transport::ApiRequest;
