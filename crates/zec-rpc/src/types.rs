//! Node RPC data types: configuration and response structures.

use serde::{Deserialize, Serialize};
use zec_script::Script;
use zec_transaction::Utxo;

use crate::error::RpcError;

/// Configuration for a [`ZcashRpcClient`](crate::ZcashRpcClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Node RPC endpoint (e.g. `http://127.0.0.1:8232`).
    pub url: String,
    /// Basic auth user name.
    pub username: String,
    /// Basic auth password.
    pub password: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8232".to_string(),
            username: String::new(),
            password: String::new(),
            timeout_secs: 10,
        }
    }
}

/// One entry of a `getaddressutxos` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressUtxo {
    /// Address the output pays to.
    #[serde(default)]
    pub address: Option<String>,
    /// Funding transaction id.
    pub txid: String,
    /// Output index in the funding transaction.
    pub output_index: u32,
    /// Hex locking script, when the node includes it.
    #[serde(default)]
    pub script: Option<String>,
    /// Value in zatoshis.
    pub satoshis: u64,
    /// Confirmation height, absent for mempool outputs.
    #[serde(default)]
    pub height: Option<u32>,
}

impl TryFrom<AddressUtxo> for Utxo {
    type Error = RpcError;

    fn try_from(raw: AddressUtxo) -> Result<Self, Self::Error> {
        let script = match raw.script.as_deref() {
            Some(hex) if !hex.is_empty() => Some(Script::from_hex(hex)?),
            _ => None,
        };
        Ok(Utxo::new(
            raw.txid,
            raw.output_index,
            raw.satoshis,
            raw.height.unwrap_or(0),
            script,
        ))
    }
}

/// Subset of the `getblockchaininfo` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockchainInfo {
    /// Network name reported by the node (`main`, `test`, `regtest`).
    pub chain: String,
    /// Height of the best validated block.
    pub blocks: u32,
    /// Best block hash.
    #[serde(default, rename = "bestblockhash")]
    pub best_block_hash: Option<String>,
}

/// Subset of the `validateaddress` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateAddressResult {
    /// Whether the node considers the address valid.
    #[serde(rename = "isvalid")]
    pub is_valid: bool,
    /// Normalized address, when valid.
    #[serde(default)]
    pub address: Option<String>,
}
