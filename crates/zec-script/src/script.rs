//! Transparent script type and builders.
//!
//! A `Script` wraps raw script bytes. The builders produce the three script
//! shapes the transaction layer needs: P2PKH locking scripts, null-data memo
//! scripts, and P2PKH unlocking (signature) scripts.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::address::Address;
use crate::opcodes::*;
use crate::ScriptError;

/// Largest memo accepted by [`Script::memo`].
///
/// The memo script starts with a one-byte length of the remainder, so
/// `OP_RETURN` + push prefix + payload must fit in 255 bytes.
pub const MAX_MEMO_LEN: usize = 252;

/// A transparent script, represented as a byte vector newtype.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Script(Vec<u8>);

impl Script {
    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or `InvalidHex`.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        let bytes = hex::decode(hex_str).map_err(|e| ScriptError::InvalidHex(e.to_string()))?;
        Ok(Script(bytes))
    }

    /// Build a pay-to-public-key-hash locking script.
    ///
    /// Produces the fixed 25-byte pattern
    /// `OP_DUP OP_HASH160 <20-byte hash> OP_EQUALVERIFY OP_CHECKSIG`.
    pub fn p2pkh(public_key_hash: &[u8; 20]) -> Self {
        let mut bytes = Vec::with_capacity(25);
        bytes.push(OP_DUP);
        bytes.push(OP_HASH160);
        bytes.push(OP_DATA_20);
        bytes.extend_from_slice(public_key_hash);
        bytes.push(OP_EQUALVERIFY);
        bytes.push(OP_CHECKSIG);
        Script(bytes)
    }

    /// Build a P2PKH locking script for an encoded address.
    ///
    /// The address prefix is not checked against a network.
    pub fn p2pkh_from_address(address: &str) -> Result<Self, ScriptError> {
        let addr = Address::decode(address)?;
        Ok(Self::p2pkh(&addr.public_key_hash))
    }

    /// Build a null-data memo script.
    ///
    /// Layout: `<len of rest> OP_RETURN <push prefix> <memo>`.
    ///
    /// # Returns
    /// The script, or `MemoTooLong` when the memo exceeds [`MAX_MEMO_LEN`].
    /// Long memos are not split across multiple pushes.
    pub fn memo(memo: &[u8]) -> Result<Self, ScriptError> {
        if memo.len() > MAX_MEMO_LEN {
            return Err(ScriptError::MemoTooLong {
                len: memo.len(),
                max: MAX_MEMO_LEN,
            });
        }
        let prefix = push_data_prefix(memo.len())?;
        let rest_len = 1 + prefix.len() + memo.len();

        let mut bytes = Vec::with_capacity(1 + rest_len);
        bytes.push(rest_len as u8);
        bytes.push(OP_RETURN);
        bytes.extend_from_slice(&prefix);
        bytes.extend_from_slice(memo);
        Ok(Script(bytes))
    }

    /// Build a P2PKH unlocking script: `push(sig || SIGHASH_ALL) push(pubkey)`.
    ///
    /// Only needed when an unlocking script is assembled locally; the
    /// consensus engine normally does this itself.
    pub fn signature_script(der_signature: &[u8], public_key: &[u8]) -> Result<Self, ScriptError> {
        let mut sig = Vec::with_capacity(der_signature.len() + 1);
        sig.extend_from_slice(der_signature);
        sig.push(SIGHASH_ALL);

        let mut script = Script::new();
        script.append_push_data(&sig)?;
        script.append_push_data(public_key)?;
        Ok(script)
    }

    /// Append a data push with the minimal length prefix.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Check if this is a P2PKH output script.
    pub fn is_p2pkh(&self) -> bool {
        let b = &self.0;
        b.len() == 25
            && b[0] == OP_DUP
            && b[1] == OP_HASH160
            && b[2] == OP_DATA_20
            && b[23] == OP_EQUALVERIFY
            && b[24] == OP_CHECKSIG
    }

    /// Encode the script as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Return a reference to the underlying bytes.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Return the push prefix for `data_len` bytes of data.
///
/// Direct push up to 75 bytes, then PUSHDATA1/2/4.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= MAX_DIRECT_PUSH {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xFF {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len <= 0xFFFF {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len <= 0xFFFF_FFFF {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Script {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Script {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Network;

    #[test]
    fn test_p2pkh_layout() {
        let hash = [0xabu8; 20];
        let script = Script::p2pkh(&hash);
        assert_eq!(script.len(), 25);
        assert!(script.is_p2pkh());
        assert_eq!(
            script.to_hex(),
            format!("76a914{}88ac", "ab".repeat(20))
        );
    }

    #[test]
    fn test_p2pkh_from_address_matches_hash() {
        let addr = Address::new([0x11; 20], Network::Test).to_string();
        let script = Script::p2pkh_from_address(&addr).unwrap();
        assert_eq!(&script.to_bytes()[3..23], &[0x11; 20]);
        assert!(Script::p2pkh_from_address("garbage").is_err());
    }

    #[test]
    fn test_memo_short() {
        let script = Script::memo(b"hello").unwrap();
        // len(rest)=7, OP_RETURN, push 5, "hello"
        assert_eq!(script.to_hex(), "076a0568656c6c6f");
    }

    #[test]
    fn test_memo_pushdata1() {
        let memo = vec![0x42u8; 80];
        let script = Script::memo(&memo).unwrap();
        let b = script.to_bytes();
        assert_eq!(b[0] as usize, b.len() - 1);
        assert_eq!(b[1], OP_RETURN);
        assert_eq!(b[2], OP_PUSHDATA1);
        assert_eq!(b[3], 80);
        assert_eq!(&b[4..], memo.as_slice());
    }

    #[test]
    fn test_memo_longest_fits_one_length_byte() {
        let script = Script::memo(&[1u8; MAX_MEMO_LEN]).unwrap();
        assert_eq!(script.to_bytes()[0], 0xFF);
        assert_eq!(script.len(), 256);
    }

    #[test]
    fn test_memo_too_long() {
        assert!(matches!(
            Script::memo(&[0u8; MAX_MEMO_LEN + 1]),
            Err(ScriptError::MemoTooLong { len: 253, max: MAX_MEMO_LEN })
        ));
    }

    #[test]
    fn test_signature_script() {
        let sig = vec![0x30u8; 71];
        let pubkey = [0x02u8; 33];
        let script = Script::signature_script(&sig, &pubkey).unwrap();
        let b = script.to_bytes();
        assert_eq!(b[0], 72);
        assert_eq!(&b[1..72], sig.as_slice());
        assert_eq!(b[72], SIGHASH_ALL);
        assert_eq!(b[73], 33);
        assert_eq!(&b[74..], &pubkey);
    }

    #[test]
    fn test_push_data_prefix_boundaries() {
        assert_eq!(push_data_prefix(75).unwrap(), vec![75]);
        assert_eq!(push_data_prefix(76).unwrap(), vec![OP_PUSHDATA1, 76]);
        assert_eq!(push_data_prefix(256).unwrap(), vec![OP_PUSHDATA2, 0x00, 0x01]);
        assert_eq!(
            push_data_prefix(0x10000).unwrap(),
            vec![OP_PUSHDATA4, 0x00, 0x00, 0x01, 0x00]
        );
    }

    #[test]
    fn test_serde_as_hex() {
        let script = Script::p2pkh(&[0u8; 20]);
        let json = serde_json::to_string(&script).unwrap();
        assert_eq!(json, format!("\"{}\"", script.to_hex()));
        let back: Script = serde_json::from_str(&json).unwrap();
        assert_eq!(back, script);
        assert!(serde_json::from_str::<Script>("\"zz\"").is_err());
    }
}
