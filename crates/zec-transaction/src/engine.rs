//! Contract with the consensus-serialization engine.
//!
//! The engine owns the byte-exact transaction encoding and the signature
//! hash algorithm. This crate hands it a [`DraftTransaction`] and gets back
//! the version and per-input sighashes, then later the signed bytes.

use serde::{Deserialize, Serialize};
use zec_script::{Network, Script};

use crate::utxo::{TxOutput, ValidUtxo};
use crate::TransactionError;

/// One output as handed to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOutput {
    pub address: String,
    pub amount: u64,
    pub memo: Option<Vec<u8>>,
    /// Locking scripts: the P2PKH script, then the memo script if any.
    pub scripts: Vec<Script>,
}

impl DraftOutput {
    /// Build the engine view of a payment output.
    pub fn from_output(output: &TxOutput) -> Result<Self, TransactionError> {
        let mut scripts = vec![Script::p2pkh_from_address(&output.address)?];
        if let Some(memo) = output.memo.as_deref().filter(|m| !m.is_empty()) {
            scripts.push(Script::memo(memo)?);
        }
        Ok(DraftOutput {
            address: output.address.clone(),
            amount: output.value,
            memo: output.memo.clone(),
            scripts,
        })
    }
}

/// Transaction shape sent to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftTransaction {
    /// Chain height the transaction is built against.
    pub height: u32,
    pub inputs: Vec<ValidUtxo>,
    pub outputs: Vec<DraftOutput>,
    /// Last valid block height, 0 for no expiry.
    pub expiry_height: u32,
    /// 0 until the engine assigns one.
    pub version: u32,
    /// Empty until the engine assigns them.
    pub sighashes: Vec<[u8; 32]>,
}

/// Engine answer to [`ConsensusEngine::build_draft`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineDraft {
    pub version: u32,
    /// One digest per input, in input order.
    pub sighashes: Vec<[u8; 32]>,
}

/// A consensus-serialization engine.
///
/// Implementations are opaque black boxes (native bindings, a remote
/// signer service, or a mock in tests). Errors should be reported as
/// [`TransactionError::Engine`].
pub trait ConsensusEngine {
    /// Compute the version and per-input sighashes for `draft`.
    fn build_draft(
        &self,
        public_key: &[u8],
        draft: &DraftTransaction,
        network: Network,
    ) -> Result<EngineDraft, TransactionError>;

    /// Merge DER signatures (one per input, no sighash byte) into `draft`
    /// and return the serialized transaction.
    fn apply_signatures(
        &self,
        public_key: &[u8],
        draft: &DraftTransaction,
        signatures: &[Vec<u8>],
        network: Network,
    ) -> Result<Vec<u8>, TransactionError>;
}

impl<E: ConsensusEngine + ?Sized> ConsensusEngine for &E {
    fn build_draft(
        &self,
        public_key: &[u8],
        draft: &DraftTransaction,
        network: Network,
    ) -> Result<EngineDraft, TransactionError> {
        (**self).build_draft(public_key, draft, network)
    }

    fn apply_signatures(
        &self,
        public_key: &[u8],
        draft: &DraftTransaction,
        signatures: &[Vec<u8>],
        network: Network,
    ) -> Result<Vec<u8>, TransactionError> {
        (**self).apply_signatures(public_key, draft, signatures, network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEST: &str = "tmLPctKo9j49rtCSKpwEBpLBeykiTGomGQs";

    #[test]
    fn test_payment_output_has_one_script() {
        let out = DraftOutput::from_output(&TxOutput::new(DEST, 1_000)).unwrap();
        assert_eq!(out.scripts.len(), 1);
        assert!(out.scripts[0].is_p2pkh());
    }

    #[test]
    fn test_memo_output_adds_null_data_script() {
        let out = DraftOutput::from_output(&TxOutput::new(DEST, 0).with_memo("hi")).unwrap();
        assert_eq!(out.scripts.len(), 2);
        assert_eq!(out.scripts[1].to_hex(), "046a026869");
    }

    #[test]
    fn test_bad_address_is_script_error() {
        assert!(matches!(
            DraftOutput::from_output(&TxOutput::new("bogus", 1)),
            Err(TransactionError::Script(_))
        ));
    }

    #[test]
    fn test_draft_serializes_scripts_as_hex() {
        let draft = DraftTransaction {
            height: 10,
            inputs: Vec::new(),
            outputs: vec![DraftOutput::from_output(&TxOutput::new(DEST, 5)).unwrap()],
            expiry_height: 50,
            version: 0,
            sighashes: Vec::new(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json["outputs"][0]["scripts"][0].as_str().unwrap().starts_with("76a914"));
        assert_eq!(json["expiry_height"], 50);
    }
}
