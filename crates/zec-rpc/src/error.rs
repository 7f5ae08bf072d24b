//! Error types for node RPC operations.

/// Errors that can occur when talking to a Zcash node.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to serialize or deserialize data.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Values reported by the node overflow a zatoshi sum.
    #[error("balance of {0} overflows u64")]
    AmountOverflow(String),

    /// Non-success HTTP status without a JSON-RPC body.
    #[error("{method} returned HTTP {status}")]
    Status {
        /// RPC method that was called.
        method: String,
        /// HTTP status code.
        status: u16,
    },

    /// The node answered with a JSON-RPC error object.
    #[error("node error ({code}): {message}")]
    Node {
        /// JSON-RPC error code.
        code: i64,
        /// Error message from the node.
        message: String,
    },

    /// The response had neither `result` nor `error`.
    #[error("{0} returned no result")]
    MissingResult(String),

    /// Could not obtain a tokio runtime for a blocking call.
    #[error("runtime error: {0}")]
    Runtime(String),

    /// A script returned by the node could not be decoded.
    #[error("script error: {0}")]
    Script(#[from] zec_script::ScriptError),
}
