//! Transparent address codec.
//!
//! Addresses are Base58Check over `prefix(2) || hash160(20)`. The prefix
//! selects the network (`t1…` on mainnet, `tm…` on testnet/regtest).

use std::fmt;

use zec_primitives::base58;
use zec_primitives::ec::PrivateKey;
use zec_primitives::hash::hash160;

use crate::{Network, ScriptError};

/// Length of the network prefix.
const PREFIX_LEN: usize = 2;
/// Length of the decoded payload (prefix + public key hash).
const PAYLOAD_LEN: usize = PREFIX_LEN + 20;

/// A decoded transparent P2PKH address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    /// The two prefix bytes found in the encoding.
    pub prefix: [u8; 2],
    /// The 20-byte RIPEMD-160(SHA-256(pubkey)) hash.
    pub public_key_hash: [u8; 20],
}

impl Address {
    /// Build an address for `network` from a public key hash.
    pub fn new(public_key_hash: [u8; 20], network: Network) -> Self {
        Address {
            prefix: network.address_prefix(),
            public_key_hash,
        }
    }

    /// Parse a Base58Check-encoded address string.
    ///
    /// # Returns
    /// An `Address`, or `InvalidAddress` when the characters, checksum or
    /// payload length are wrong. The prefix is not checked against any
    /// network here; see [`Address::is_for`].
    pub fn decode(addr: &str) -> Result<Self, ScriptError> {
        let payload = base58::check_decode(addr)
            .map_err(|e| ScriptError::InvalidAddress(format!("'{}': {}", addr, e)))?;

        if payload.len() != PAYLOAD_LEN {
            return Err(ScriptError::InvalidAddress(format!(
                "'{}': expected {} payload bytes, got {}",
                addr,
                PAYLOAD_LEN,
                payload.len()
            )));
        }

        let mut prefix = [0u8; PREFIX_LEN];
        prefix.copy_from_slice(&payload[..PREFIX_LEN]);
        let mut public_key_hash = [0u8; 20];
        public_key_hash.copy_from_slice(&payload[PREFIX_LEN..]);

        Ok(Address {
            prefix,
            public_key_hash,
        })
    }

    /// Encode the address as its Base58Check string.
    pub fn encode(&self) -> String {
        encode(self.prefix, &self.public_key_hash)
    }

    /// Whether the prefix matches the one expected for `network`.
    pub fn is_for(&self, network: Network) -> bool {
        self.prefix == network.address_prefix()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Base58Check-encode `prefix || public_key_hash`.
pub fn encode(prefix: [u8; 2], public_key_hash: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(PAYLOAD_LEN);
    payload.extend_from_slice(&prefix);
    payload.extend_from_slice(public_key_hash);
    base58::check_encode(&payload)
}

/// Decode an address into its prefix and public key hash.
pub fn decode(address: &str) -> Result<Address, ScriptError> {
    Address::decode(address)
}

/// Check that `address` decodes and carries `network`'s prefix.
///
/// Never errors: malformed input and cross-network addresses both yield
/// `false`, so this can be used as a plain predicate.
pub fn is_valid(address: &str, network: Network) -> bool {
    Address::decode(address)
        .map(|a| a.is_for(network))
        .unwrap_or(false)
}

/// Derive the address for a SEC1 public key (compressed or uncompressed).
pub fn address_from_public_key(public_key: &[u8], network: Network) -> String {
    encode(network.address_prefix(), &hash160(public_key))
}

/// Derive the compressed-key address for a WIF or hex private key.
pub fn address_from_private_key(private_key: &str, network: Network) -> Result<String, ScriptError> {
    let key = PrivateKey::parse(private_key)?;
    Ok(address_from_public_key(&key.public_key_compressed(), network))
}

/// Extract the 20-byte public key hash, dropping the network prefix.
pub fn public_key_hash_from_address(address: &str) -> Result<[u8; 20], ScriptError> {
    Address::decode(address).map(|a| a.public_key_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hash160 of the compressed generator point.
    const GENERATOR_HASH: &str = "751e76e8199196d454941c45d1b3a323f1433bd6";
    const GENERATOR_PUBKEY: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const GENERATOR_MAINNET: &str = "t1UYsZVJkLPeMjxEtACvSxfWuNmddpWfxzs";
    const GENERATOR_TESTNET: &str = "tmLPctKo9j49rtCSKpwEBpLBeykiTGomGQs";

    fn generator_hash() -> [u8; 20] {
        let mut h = [0u8; 20];
        h.copy_from_slice(&hex::decode(GENERATOR_HASH).unwrap());
        h
    }

    #[test]
    fn test_encode_mainnet_and_testnet() {
        assert_eq!(encode(Network::Main.address_prefix(), &generator_hash()), GENERATOR_MAINNET);
        assert_eq!(encode(Network::Test.address_prefix(), &generator_hash()), GENERATOR_TESTNET);
    }

    #[test]
    fn test_zero_hash_mainnet_address() {
        assert_eq!(
            Address::new([0u8; 20], Network::Main).to_string(),
            "t1Hsc1LR8yKnbbe3twRp88p6vFfC5t7DLbs"
        );
    }

    #[test]
    fn test_decode_extracts_prefix_and_hash() {
        let addr = decode(GENERATOR_TESTNET).unwrap();
        assert_eq!(addr.prefix, [0x1d, 0x25]);
        assert_eq!(addr.public_key_hash, generator_hash());
    }

    #[test]
    fn test_address_from_public_key() {
        let pubkey = hex::decode(GENERATOR_PUBKEY).unwrap();
        assert_eq!(address_from_public_key(&pubkey, Network::Main), GENERATOR_MAINNET);
        assert_eq!(address_from_public_key(&pubkey, Network::Regtest), GENERATOR_TESTNET);
    }

    #[test]
    fn test_address_from_private_key() {
        let wif = "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn";
        assert_eq!(address_from_private_key(wif, Network::Main).unwrap(), GENERATOR_MAINNET);
        assert!(address_from_private_key("nope", Network::Main).is_err());
    }

    #[test]
    fn test_is_valid_rejects_cross_network() {
        assert!(is_valid(GENERATOR_MAINNET, Network::Main));
        assert!(!is_valid(GENERATOR_MAINNET, Network::Test));
        assert!(!is_valid(GENERATOR_MAINNET, Network::Regtest));
        assert!(is_valid(GENERATOR_TESTNET, Network::Test));
        assert!(is_valid(GENERATOR_TESTNET, Network::Regtest));
        assert!(!is_valid(GENERATOR_TESTNET, Network::Main));
    }

    #[test]
    fn test_is_valid_false_on_garbage() {
        assert!(!is_valid("", Network::Main));
        assert!(!is_valid("not an address", Network::Main));
        // Single-byte prefix (Bitcoin P2PKH): wrong payload length.
        assert!(!is_valid("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH", Network::Main));
    }

    #[test]
    fn test_decode_bad_checksum() {
        let mut tampered = GENERATOR_MAINNET.to_string();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'a' { 'b' } else { 'a' });
        assert!(matches!(decode(&tampered), Err(ScriptError::InvalidAddress(_))));
    }

    #[test]
    fn test_public_key_hash_from_address() {
        assert_eq!(public_key_hash_from_address(GENERATOR_MAINNET).unwrap(), generator_hash());
        assert!(matches!(
            public_key_hash_from_address("t1short"),
            Err(ScriptError::InvalidAddress(_))
        ));
    }
}
