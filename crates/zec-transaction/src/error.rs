/// Error types for selection, building, and signing.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Address is malformed or belongs to a different network.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Amount above the money supply cap, or a sum that overflows.
    #[error("invalid amount: {0}")]
    InvalidAmount(u64),

    /// A zero-value output was added without a memo.
    #[error("zero-value output requires a memo")]
    MissingMemo,

    /// Fee rate must be positive.
    #[error("invalid fee rate: {0}")]
    InvalidFeeRate(u64),

    /// Dust threshold above the money supply cap.
    #[error("invalid dust threshold: {0}")]
    InvalidThreshold(u64),

    #[error("transaction has no inputs")]
    NoInputs,

    #[error("transaction has no outputs")]
    NoOutputs,

    /// An input reached a point where its locking script is required.
    #[error("utxo {txid}:{vout} has no locking script")]
    MissingScript {
        txid: String,
        vout: u32,
    },

    /// Available input value does not cover outputs plus fee.
    #[error("insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds {
        /// Outputs plus fee, in zatoshis.
        needed: u64,
        /// Sum of the inputs considered, in zatoshis.
        available: u64,
    },

    /// Number of signatures differs from the number of inputs.
    #[error("expected {expected} signatures, got {actual}")]
    SignatureCountMismatch {
        expected: usize,
        actual: usize,
    },

    /// Failure reported by the consensus-serialization engine.
    #[error("engine error: {0}")]
    Engine(String),

    /// An underlying script error (forwarded from `zec-script`).
    #[error("script error: {0}")]
    Script(#[from] zec_script::ScriptError),

    /// An underlying primitives error (forwarded from `zec-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] zec_primitives::PrimitivesError),
}
