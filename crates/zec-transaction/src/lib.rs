/// Zcash transparent SDK - UTXO selection, fee estimation, and transaction building.
///
/// Provides the UTXO and output data model, the fixed-rate fee model, the
/// accumulative selector, and the two-phase builder that delegates
/// serialization and sighash computation to a `ConsensusEngine`.

pub mod utxo;
pub mod fee;
pub mod selector;
pub mod engine;
pub mod signer;
pub mod builder;

mod error;
pub use error::TransactionError;
pub use utxo::{TxOutput, Utxo, ValidUtxo, MAX_MONEY};
pub use selector::Selection;
pub use engine::{ConsensusEngine, DraftOutput, DraftTransaction, EngineDraft};
pub use signer::SighashSigner;
pub use builder::{
    BuildResult, BuilderConfig, BuilderSnapshot, BuilderState, SelectionStrategy,
    SignedTransaction, TransactionBuilder, UnsignedTransaction,
};
