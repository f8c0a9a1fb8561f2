/// Top-level error for every client operation.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("encode JSON-RPC request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// A caller-supplied parameter was rejected before any request was sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{label} has invalid value. Expected values are: {expected}, actual: {actual}")]
    InvalidValue {
        label: String,
        expected: String,
        actual: String,
    },
}

/// Failure derived from the HTTP status of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    #[error("invalid RPC credentials")]
    Authentication,

    #[error("RPC resource not found")]
    NotFound,

    /// The daemon answered 500 with a JSON-RPC error; `message` is its
    /// `error.message` verbatim.
    #[error("{message}")]
    Server { message: String },

    #[error("unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("malformed error response (HTTP {status}): {reason}")]
    MalformedErrorResponse { status: u16, reason: String },
}

/// Failure of the HTTP layer itself (connection, DNS, body read).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}
