//! Unspent outputs and payment outputs.
//!
//! `Utxo` is what a data source hands us: the locking script may be
//! unknown. `ValidUtxo` is the same coin once its script is known to be
//! present; every path that needs the script converts first and fails with
//! `MissingScript` instead of guessing.

use serde::{Deserialize, Serialize};
use zec_script::Script;

use crate::TransactionError;

/// Total money supply in zatoshis (21 million coins).
pub const MAX_MONEY: u64 = 21_000_000 * 100_000_000;

/// An unspent transparent output as reported by a node or indexer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    /// Hex-encoded id of the transaction that created the output.
    pub txid: String,
    /// Output index within that transaction.
    pub vout: u32,
    /// Value in zatoshis.
    pub value: u64,
    /// Height of the block containing the output, 0 if unknown.
    pub height: u32,
    /// Locking script, when the source supplied one.
    pub script: Option<Script>,
}

impl Utxo {
    pub fn new(txid: impl Into<String>, vout: u32, value: u64, height: u32, script: Option<Script>) -> Self {
        Utxo {
            txid: txid.into(),
            vout,
            value,
            height,
            script,
        }
    }

    /// Convert into a `ValidUtxo`, cloning.
    pub fn to_valid(&self) -> Result<ValidUtxo, TransactionError> {
        ValidUtxo::try_from(self.clone())
    }
}

/// A `Utxo` whose locking script is known.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidUtxo {
    pub txid: String,
    pub vout: u32,
    pub value: u64,
    pub height: u32,
    pub script: Script,
}

impl TryFrom<Utxo> for ValidUtxo {
    type Error = TransactionError;

    fn try_from(utxo: Utxo) -> Result<Self, Self::Error> {
        match utxo.script {
            Some(script) => Ok(ValidUtxo {
                txid: utxo.txid,
                vout: utxo.vout,
                value: utxo.value,
                height: utxo.height,
                script,
            }),
            None => Err(TransactionError::MissingScript {
                txid: utxo.txid,
                vout: utxo.vout,
            }),
        }
    }
}

impl From<ValidUtxo> for Utxo {
    fn from(utxo: ValidUtxo) -> Self {
        Utxo {
            txid: utxo.txid,
            vout: utxo.vout,
            value: utxo.value,
            height: utxo.height,
            script: Some(utxo.script),
        }
    }
}

/// A requested payment (or memo-only) output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    /// Destination transparent address.
    pub address: String,
    /// Value in zatoshis. Zero only when a memo is attached.
    pub value: u64,
    /// Optional memo bytes, carried in a separate null-data output.
    pub memo: Option<Vec<u8>>,
}

impl TxOutput {
    pub fn new(address: impl Into<String>, value: u64) -> Self {
        TxOutput {
            address: address.into(),
            value,
            memo: None,
        }
    }

    /// Attach a memo. An empty memo is stored as no memo.
    pub fn with_memo(mut self, memo: impl Into<Vec<u8>>) -> Self {
        let memo = memo.into();
        self.memo = if memo.is_empty() { None } else { Some(memo) };
        self
    }

    /// Memo bytes, or an empty slice.
    pub fn memo_bytes(&self) -> &[u8] {
        self.memo.as_deref().unwrap_or_default()
    }
}

/// Sum output values, failing with `InvalidAmount` on overflow.
pub(crate) fn sum_values<I>(values: I) -> Result<u64, TransactionError>
where
    I: IntoIterator<Item = u64>,
{
    values.into_iter().try_fold(0u64, |acc, v| {
        acc.checked_add(v).ok_or(TransactionError::InvalidAmount(v))
    })
}

/// Total memo bytes across a set of outputs.
pub(crate) fn total_memo_len(outputs: &[TxOutput]) -> usize {
    outputs.iter().map(|o| o.memo_bytes().len()).sum()
}
