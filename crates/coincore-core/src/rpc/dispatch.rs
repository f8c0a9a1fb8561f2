use tracing::{debug, trace, warn};

use crate::error::CoreError;
use crate::transport::{HttpRequest, HttpTransport};

use super::protocol::{translate, JsonRpcRequest, STATUS_OK};

/// Sends one JSON-RPC request per call and hands back the raw body.
///
/// Holds no per-call state, so a shared reference can serve concurrent
/// callers; the correlation id travels with each call.
pub struct Dispatcher<T> {
    transport: T,
    endpoint: String,
}

impl<T: HttpTransport> Dispatcher<T> {
    pub fn new(endpoint: impl Into<String>, transport: T) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// POST `{"method", "params", "id"}` to the endpoint.
    ///
    /// Returns the body untouched on HTTP 200. Any other status is turned
    /// into an [`RpcError`](crate::error::RpcError); transport failures pass
    /// through as [`CoreError::Transport`].
    pub async fn dispatch(
        &self,
        method: &str,
        params: &[serde_json::Value],
        id: Option<&str>,
    ) -> Result<String, CoreError> {
        debug!(
            rpc.method = method,
            rpc.id = ?id,
            rpc.params = params.len(),
            "rpc call"
        );
        let body = serde_json::to_string(&JsonRpcRequest { method, params, id })
            .map_err(CoreError::Encode)?;

        let request = HttpRequest {
            url: self.endpoint.clone(),
            headers: vec![("Content-Type".to_owned(), "application/json".to_owned())],
            body,
        };
        let response = self.transport.send(request).await?;
        debug!(
            rpc.method = method,
            rpc.id = ?id,
            status = response.status,
            body_len = response.body.len(),
            "rpc response"
        );
        trace!(rpc.method = method, body = %response.body, "rpc response body");

        if response.status == STATUS_OK {
            return Ok(response.body);
        }

        let err = translate(response.status, &response.body);
        warn!(
            rpc.method = method,
            status = response.status,
            error = %err,
            "rpc call failed"
        );
        Err(err.into())
    }
}
