//! Accumulative UTXO selection.
//!
//! Candidates are taken largest first until they cover the targets plus the
//! fee for the current input count. The fee is always estimated with one
//! extra output slot for change.

use tracing::debug;

use crate::fee::estimate_fee;
use crate::utxo::{sum_values, total_memo_len, TxOutput, Utxo, ValidUtxo};
use crate::TransactionError;

/// Outcome of a successful selection.
///
/// `inputs` always cover `outputs` plus `fee` exactly: leftover value that
/// does not become a change output is counted in `fee`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub inputs: Vec<ValidUtxo>,
    /// The targets, followed by the change output when one was created.
    pub outputs: Vec<TxOutput>,
    pub fee: u64,
}

impl Selection {
    pub fn total_input(&self) -> u64 {
        self.inputs.iter().map(|u| u.value).sum()
    }

    pub fn total_output(&self) -> u64 {
        self.outputs.iter().map(|o| o.value).sum()
    }
}

/// Select inputs from `candidates` to pay `targets`.
///
/// # Arguments
/// * `candidates` - Spendable coins; order only matters between equal values.
/// * `targets` - Requested outputs.
/// * `change_address` - Where leftover above `dust_threshold` is sent.
///   Without one, all leftover goes to the fee.
/// * `dust_threshold` - Leftover at or below this is not worth an output.
///
/// # Returns
/// A `Selection`, `NoOutputs` for an empty target list, `MissingScript` if a
/// selected coin has no locking script, or `InsufficientFunds` when every
/// candidate together still falls short.
pub fn select(
    candidates: &[Utxo],
    targets: &[TxOutput],
    change_address: Option<&str>,
    dust_threshold: u64,
) -> Result<Selection, TransactionError> {
    if targets.is_empty() {
        return Err(TransactionError::NoOutputs);
    }

    let target = sum_values(targets.iter().map(|t| t.value))?;
    let memo_len = total_memo_len(targets);
    let output_slots = targets.len() + 1;

    let mut sorted: Vec<&Utxo> = candidates.iter().collect();
    sorted.sort_by(|a, b| b.value.cmp(&a.value));

    let mut selected: Vec<ValidUtxo> = Vec::new();
    let mut accumulated = 0u64;
    let mut needed = target.saturating_add(estimate_fee(0, output_slots, memo_len));

    for utxo in sorted {
        let valid = utxo.to_valid()?;
        accumulated = accumulated
            .checked_add(valid.value)
            .ok_or(TransactionError::InvalidAmount(valid.value))?;
        selected.push(valid);

        let fee = estimate_fee(selected.len(), output_slots, memo_len);
        needed = target
            .checked_add(fee)
            .ok_or(TransactionError::InvalidAmount(fee))?;

        debug!(
            inputs = selected.len(),
            accumulated,
            needed,
            "accumulating utxos"
        );

        if accumulated >= needed {
            let leftover = accumulated - needed;
            let mut outputs = targets.to_vec();
            let fee = match change_address {
                Some(addr) if leftover > dust_threshold => {
                    outputs.push(TxOutput::new(addr, leftover));
                    fee
                }
                _ => fee + leftover,
            };
            return Ok(Selection {
                inputs: selected,
                outputs,
                fee,
            });
        }
    }

    Err(TransactionError::InsufficientFunds {
        needed,
        available: accumulated,
    })
}
