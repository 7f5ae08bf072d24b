/// Elliptic curve cryptography on secp256k1.
///
/// Only the signing half is needed by the transaction layer: parse a key,
/// derive its compressed public key, and produce DER signatures over
/// sighash digests computed elsewhere.

pub mod private_key;

pub use private_key::PrivateKey;
