use std::future::{Future, IntoFuture};
use std::pin::Pin;

use crate::error::CoreError;
use crate::transport::HttpTransport;

use super::dispatch::Dispatcher;

/// A validated call that has not been sent yet.
///
/// Sending consumes it, so a correlation id attached with
/// [`with_id`](Self::with_id) belongs to exactly one request.
#[must_use = "an RpcCall does nothing until it is sent or awaited"]
pub struct RpcCall<'a, T> {
    dispatcher: &'a Dispatcher<T>,
    method: String,
    params: Vec<serde_json::Value>,
    id: Option<String>,
}

impl<'a, T: HttpTransport> RpcCall<'a, T> {
    pub(super) fn new(
        dispatcher: &'a Dispatcher<T>,
        method: String,
        params: Vec<serde_json::Value>,
    ) -> Self {
        Self {
            dispatcher,
            method,
            params,
            id: None,
        }
    }

    /// Attach a correlation id; the daemon echoes it in the response `id`.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &[serde_json::Value] {
        &self.params
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Send the request and return the raw response body.
    pub async fn send(self) -> Result<String, CoreError> {
        self.dispatcher
            .dispatch(&self.method, &self.params, self.id.as_deref())
            .await
    }
}

impl<'a, T: HttpTransport + 'a> IntoFuture for RpcCall<'a, T> {
    type Output = Result<String, CoreError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}
