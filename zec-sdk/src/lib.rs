#![deny(missing_docs)]

//! Zcash transparent SDK - Complete SDK.
//!
//! Re-exports all SDK components for convenient single-crate usage.
//!
//! ```no_run
//! use zec_sdk::script::Network;
//! use zec_sdk::transaction::{TransactionBuilder, Utxo};
//!
//! # fn run(utxos: Vec<Utxo>) -> Result<(), zec_sdk::transaction::TransactionError> {
//! let mut builder = TransactionBuilder::new("testnet".parse::<Network>()?);
//! builder
//!     .add_output("tmLPctKo9j49rtCSKpwEBpLBeykiTGomGQs", 50_000, None)?
//!     .set_change_address("tm9iMLAuYMzJ6jtFLcA7rzUmfreGuKvr7Ma")?;
//! builder.add_inputs(utxos);
//! # Ok(())
//! # }
//! ```

pub use zec_primitives as primitives;
pub use zec_script as script;
pub use zec_transaction as transaction;
pub use zec_rpc as rpc;
