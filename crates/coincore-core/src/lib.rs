//! Typed client for Bitcoin/Litecoin Core style JSON-RPC daemons.
//!
//! Calls are validated locally, posted as `{"method", "params", "id"}` over
//! an injected [`HttpTransport`](transport::HttpTransport), and answered with
//! the raw response body. Failed HTTP statuses become typed
//! [`RpcError`]s.

pub mod config;
pub mod error;
pub mod rpc;
pub mod transport;

pub use config::Configuration;
pub use error::{CoreError, RpcError, TransportError, ValidationError};
pub use rpc::{RpcCall, RpcClient, SendToAddressOptions};
