/// Zcash transparent SDK - Networks, addresses, and locking scripts.
///
/// Provides the canonical network enumeration, the Base58Check address
/// codec with two-byte network prefixes, opcode constants, and the script
/// builders for P2PKH, null-data memo, and P2PKH unlocking scripts.

pub mod network;
pub mod address;
pub mod opcodes;
pub mod script;

mod error;
pub use error::ScriptError;
pub use address::Address;
pub use network::Network;
pub use script::Script;
