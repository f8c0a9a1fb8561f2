//! HTTP transport seam.
//!
//! The dispatcher only needs "send one POST, get a status and a body back".
//! [`HttpTransport`] captures that; [`ReqwestTransport`] is the default
//! implementation with basic auth, timeouts and optional rate limiting.

mod connection;
mod http_adapter;

pub use connection::{endpoint_url, parse_endpoint};
pub use http_adapter::ReqwestTransport;

use async_trait::async_trait;

use crate::error::TransportError;

/// A single outbound POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Endpoint the dispatcher was created for. Transports bound to one
    /// daemon, like [`ReqwestTransport`], may ignore it.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// The status code and full body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends requests to the daemon.
///
/// Implementations own authentication, timeouts and connection reuse. A
/// completed exchange is `Ok` whatever its status code; `Err` is reserved for
/// failures where no response was received.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
