//! Fixed-rate fee and size estimation.
//!
//! Fees follow the transparent relay rule: a base fee plus a marginal fee
//! per input and per output, with memo payloads priced as extra 34-byte
//! output slots.

/// Base relay fee in zatoshis.
pub const BASE_RELAY_FEE: u64 = 10_000;

/// Fee charged per input and per output slot.
pub const MARGINAL_FEE: u64 = 5_000;

/// Bytes per output slot, also the chunk size used to price memo bytes.
pub const OUTPUT_SIZE: usize = 34;

/// Approximate serialized size of a signed P2PKH input.
pub const INPUT_SIZE: usize = 150;

/// Fixed transaction overhead in bytes.
pub const BASE_SIZE: usize = 40;

/// Memo overhead added before chunking.
const MEMO_OVERHEAD: usize = 2;

/// Number of extra output slots a memo of `memo_len` bytes occupies.
pub fn memo_output_count(memo_len: usize) -> usize {
    if memo_len == 0 {
        0
    } else {
        (memo_len + MEMO_OVERHEAD).div_ceil(OUTPUT_SIZE)
    }
}

/// Estimate the fee for a transaction shape.
///
/// At least one input and two outputs are always charged, so a lone
/// payment is priced as if it had change.
pub fn estimate_fee(input_count: usize, output_count: usize, memo_len: usize) -> u64 {
    let inputs = input_count.max(1) as u64;
    let outputs = (output_count.max(2) + memo_output_count(memo_len)) as u64;
    (inputs + outputs) * MARGINAL_FEE + BASE_RELAY_FEE
}

/// Estimate the serialized size in bytes. Diagnostic only.
pub fn estimate_size(input_count: usize, output_count: usize, memo_len: usize) -> usize {
    BASE_SIZE + input_count * INPUT_SIZE + (output_count + memo_output_count(memo_len)) * OUTPUT_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimums_apply() {
        // 1 input + 2 outputs charged even for an empty shape.
        assert_eq!(estimate_fee(0, 0, 0), 25_000);
        assert_eq!(estimate_fee(1, 1, 0), 25_000);
        assert_eq!(estimate_fee(1, 2, 0), 25_000);
        assert_eq!(estimate_fee(2, 3, 0), 35_000);
    }

    #[test]
    fn test_memo_slots() {
        assert_eq!(memo_output_count(0), 0);
        assert_eq!(memo_output_count(1), 1);
        assert_eq!(memo_output_count(32), 1);
        assert_eq!(memo_output_count(33), 2);
        assert_eq!(estimate_fee(1, 2, 32), 30_000);
        assert_eq!(estimate_fee(1, 2, 33), 35_000);
    }

    #[test]
    fn test_estimate_size() {
        assert_eq!(estimate_size(0, 0, 0), 40);
        assert_eq!(estimate_size(1, 2, 0), 40 + 150 + 68);
        assert_eq!(estimate_size(1, 2, 10), 40 + 150 + 102);
    }
}
