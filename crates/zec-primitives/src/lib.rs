/// Zcash transparent SDK - Cryptographic primitives, hashing, and encoding.
///
/// This crate provides the foundational building blocks for the SDK:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - Base58 and Base58Check encoding/decoding
/// - secp256k1 private keys (hex/WIF parsing, digest signing)

pub mod hash;
pub mod base58;
pub mod ec;

mod error;
pub use error::PrimitivesError;
