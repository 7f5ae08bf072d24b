/// Error types for network, address, and script operations.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Malformed address, bad checksum, wrong length, or wrong network.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Network identifier that does not canonicalize to Main, Test or Regtest.
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    /// Memo payload too long to fit a single null-data push.
    #[error("memo too long: {len} bytes (max {max})")]
    MemoTooLong {
        /// Length of the rejected memo.
        len: usize,
        /// Largest memo accepted by the memo script builder.
        max: usize,
    },

    /// Push data exceeds maximum allowed size.
    #[error("data too big")]
    DataTooBig,

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] zec_primitives::PrimitivesError),
}
