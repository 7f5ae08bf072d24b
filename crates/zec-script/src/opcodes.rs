//! Opcode constants used by transparent locking and unlocking scripts.

/// Push the next 20 bytes (a Hash160).
pub const OP_DATA_20: u8 = 0x14;
/// Next byte holds the push length.
pub const OP_PUSHDATA1: u8 = 0x4c;
/// Next two bytes (LE) hold the push length.
pub const OP_PUSHDATA2: u8 = 0x4d;
/// Next four bytes (LE) hold the push length.
pub const OP_PUSHDATA4: u8 = 0x4e;
/// Marks an output as provably unspendable (null data).
pub const OP_RETURN: u8 = 0x6a;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;

/// Largest payload pushed with a single direct-length opcode.
pub const MAX_DIRECT_PUSH: usize = 75;

/// Sighash type byte appended to every signature (SIGHASH_ALL).
pub const SIGHASH_ALL: u8 = 0x01;
