//! JSON-RPC dispatch layer.
//!
//! [`Dispatcher`] performs one HTTP exchange per call and translates failed
//! statuses into [`RpcError`](crate::error::RpcError)s. [`RpcClient`] adds a
//! typed wrapper per daemon method on top, driven by the descriptors in
//! [`methods`]. Tests use `mock::MockTransport` in place of HTTP.

mod call;
mod client;
mod dispatch;
pub mod methods;
#[cfg(test)]
pub mod mock;
mod protocol;
mod validation;

pub use call::RpcCall;
pub use client::{RpcClient, SendToAddressOptions};
pub use dispatch::Dispatcher;
pub use methods::{lookup, MethodSpec, METHODS};
pub use protocol::translate;
pub use validation::validate_enum;
