//! secp256k1 private key for transparent signing.
//!
//! Wraps a k256 signing key and adds hex/WIF parsing, compressed public key
//! derivation, and DER signing of precomputed 32-byte digests.

use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{Signature, SigningKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::base58;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// Length of a digest accepted by [`PrivateKey::sign_digest`].
const DIGEST_LEN: usize = 32;

/// Compression flag byte appended to WIF for compressed public keys.
const COMPRESS_MAGIC: u8 = 0x01;

/// A secp256k1 private key used to sign sighash digests.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    /// The underlying k256 signing key.
    inner: SigningKey,
}

impl PrivateKey {
    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid non-zero scalar,
    /// or `InvalidPrivateKey` otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let inner = SigningKey::from_slice(bytes)
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner })
    }

    /// Create a private key from a 64-character hexadecimal string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Create a private key from a WIF (Wallet Import Format) string.
    ///
    /// The version byte is not interpreted, so both mainnet (`0x80`) and
    /// testnet (`0xef`) keys are accepted. A 34-byte payload must end with
    /// the compression flag.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        let payload = base58::check_decode(wif).map_err(|e| match e {
            PrimitivesError::ChecksumMismatch => PrimitivesError::ChecksumMismatch,
            other => PrimitivesError::InvalidWif(other.to_string()),
        })?;

        match payload.len() {
            34 if payload[33] == COMPRESS_MAGIC => Self::from_bytes(&payload[1..33]),
            34 => Err(PrimitivesError::InvalidWif(
                "malformed private key: invalid compression flag".to_string(),
            )),
            33 => Self::from_bytes(&payload[1..]),
            n => Err(PrimitivesError::InvalidWif(format!(
                "malformed private key: invalid length {}",
                n
            ))),
        }
    }

    /// Parse a private key given either as WIF or as 64 hex characters.
    ///
    /// WIF is tried first; a 64-character string that is not valid WIF is
    /// then read as hex.
    pub fn parse(key: &str) -> Result<Self, PrimitivesError> {
        let key = key.trim();
        match Self::from_wif(key) {
            Ok(pk) => Ok(pk),
            Err(_) if key.len() == PRIVATE_KEY_BYTES_LEN * 2 => Self::from_hex(key),
            Err(_) => Err(PrimitivesError::InvalidPrivateKey(
                "invalid private key format".to_string(),
            )),
        }
    }

    /// Serialize the private key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; PRIVATE_KEY_BYTES_LEN];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Derive the 33-byte compressed SEC1 public key.
    pub fn public_key_compressed(&self) -> [u8; 33] {
        let point = self.inner.verifying_key().to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Sign a precomputed 32-byte digest.
    ///
    /// Uses RFC6979 deterministic nonces and low-S normalization. The
    /// digest is signed as-is (no further hashing).
    ///
    /// # Returns
    /// The DER-encoded signature, without a sighash-type suffix.
    pub fn sign_digest(&self, digest: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
        if digest.len() != DIGEST_LEN {
            return Err(PrimitivesError::InvalidSignature(format!(
                "digest must be {} bytes, got {}",
                DIGEST_LEN,
                digest.len()
            )));
        }
        let signature: Signature = self.inner.sign_prehash(digest)?;
        let signature = signature.normalize_s().unwrap_or(signature);
        Ok(signature.to_der().as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::signature::hazmat::PrehashVerifier;

    const KEY_ONE_HEX: &str = "0000000000000000000000000000000000000000000000000000000000000001";
    const KEY_ONE_WIF: &str = "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn";
    const GENERATOR_COMPRESSED: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    #[test]
    fn test_from_hex_derives_generator() {
        let pk = PrivateKey::from_hex(KEY_ONE_HEX).unwrap();
        assert_eq!(hex::encode(pk.public_key_compressed()), GENERATOR_COMPRESSED);
    }

    #[test]
    fn test_from_wif_compressed() {
        let pk = PrivateKey::from_wif(KEY_ONE_WIF).unwrap();
        assert_eq!(hex::encode(pk.to_bytes()), KEY_ONE_HEX);
    }

    #[test]
    fn test_parse_accepts_wif_and_hex() {
        let a = PrivateKey::parse(KEY_ONE_WIF).unwrap();
        let b = PrivateKey::parse(KEY_ONE_HEX).unwrap();
        assert_eq!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            PrivateKey::parse("not-a-key"),
            Err(PrimitivesError::InvalidPrivateKey(_))
        ));
    }

    #[test]
    fn test_zero_scalar_rejected() {
        assert!(PrivateKey::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(matches!(
            PrivateKey::from_bytes(&[1u8; 31]),
            Err(PrimitivesError::InvalidPrivateKey(_))
        ));
    }

    #[test]
    fn test_sign_digest_verifies() {
        let pk = PrivateKey::from_hex(KEY_ONE_HEX).unwrap();
        let digest = crate::hash::sha256(b"sighash");
        let der = pk.sign_digest(&digest).unwrap();
        assert_eq!(der[0], 0x30);

        let sig = Signature::from_der(&der).unwrap();
        assert!(sig.normalize_s().is_none(), "signature must be low-S");
        pk.inner
            .verifying_key()
            .verify_prehash(&digest, &sig)
            .expect("signature should verify");
    }

    #[test]
    fn test_sign_digest_is_deterministic() {
        let pk = PrivateKey::from_hex(KEY_ONE_HEX).unwrap();
        let digest = [7u8; 32];
        assert_eq!(pk.sign_digest(&digest).unwrap(), pk.sign_digest(&digest).unwrap());
    }

    #[test]
    fn test_sign_digest_rejects_short_digest() {
        let pk = PrivateKey::from_hex(KEY_ONE_HEX).unwrap();
        assert!(pk.sign_digest(&[1u8; 20]).is_err());
    }
}
