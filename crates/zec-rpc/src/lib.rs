#![deny(missing_docs)]

//! # zec-rpc
//!
//! JSON-RPC client for a Zcash node, used purely as a data source for
//! unspent outputs and the current chain height.
//!
//! The client is async-first and also implements the blocking
//! [`UtxoSource`] trait for synchronous callers.
//!
//! # Example
//!
//! ```no_run
//! use zec_rpc::{RpcConfig, ZcashRpcClient};
//!
//! let client = ZcashRpcClient::new(RpcConfig {
//!     username: "user".to_string(),
//!     password: "pass".to_string(),
//!     ..Default::default()
//! })
//! .unwrap();
//! ```

pub mod client;
pub mod error;
pub mod types;


pub use client::{UtxoSource, ZcashRpcClient};
pub use error::RpcError;
pub use types::{AddressUtxo, BlockchainInfo, RpcConfig, ValidateAddressResult};
