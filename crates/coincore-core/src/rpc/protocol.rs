use serde::{Deserialize, Serialize};

use crate::error::RpcError;

pub(super) const STATUS_OK: u16 = 200;

/// Request body: `{"method": .., "params": [..], "id": ..}`.
///
/// `id` serializes as `null` when absent and `params` keeps `null` entries,
/// which the daemon reads as "use the default for this position".
#[derive(Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) method: &'a str,
    pub(super) params: &'a [serde_json::Value],
    pub(super) id: Option<&'a str>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: JsonRpcErrorObject,
}

#[derive(Deserialize)]
struct JsonRpcErrorObject {
    message: String,
}

/// Map a non-200 response onto the typed failure set.
///
/// Only 500 looks at the body; 401 and 404 are decided by status alone.
pub fn translate(status: u16, body: &str) -> RpcError {
    match status {
        401 => RpcError::Authentication,
        404 => RpcError::NotFound,
        500 => parse_server_error(status, body),
        other => RpcError::UnexpectedStatus { status: other },
    }
}

fn parse_server_error(status: u16, body: &str) -> RpcError {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            return RpcError::MalformedErrorResponse {
                status,
                reason: format!("body is not JSON: {e}"),
            }
        }
    };

    match serde_json::from_value::<ErrorEnvelope>(value) {
        Ok(envelope) => RpcError::Server {
            message: envelope.error.message,
        },
        Err(e) => RpcError::MalformedErrorResponse {
            status,
            reason: format!("missing error.message: {e}"),
        },
    }
}
