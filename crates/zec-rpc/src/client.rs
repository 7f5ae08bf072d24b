//! JSON-RPC client for a Zcash node, used as a UTXO and chain-height source.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::debug;
use zec_transaction::Utxo;

use crate::error::RpcError;
use crate::types::{AddressUtxo, BlockchainInfo, RpcConfig, ValidateAddressResult};

/// Blocking data-source contract used by wallet code that is not async.
pub trait UtxoSource {
    /// Unspent outputs for `address`.
    fn get_utxos(&self, address: &str) -> Result<Vec<Utxo>, RpcError>;

    /// Height of the node's best block.
    fn get_blockchain_height(&self) -> Result<u32, RpcError>;
}

/// HTTP client for the zcashd JSON-RPC interface.
#[derive(Debug, Clone)]
pub struct ZcashRpcClient {
    /// Client configuration.
    config: RpcConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl ZcashRpcClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RpcConfig) -> Result<Self, RpcError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    /// The configuration this client was created with.
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Unspent outputs for `address` via `getaddressutxos`.
    pub async fn get_utxos_async(&self, address: &str) -> Result<Vec<Utxo>, RpcError> {
        let raw: Vec<AddressUtxo> = self.call("getaddressutxos", json!([address])).await?;
        raw.into_iter().map(Utxo::try_from).collect()
    }

    /// Full `getblockchaininfo` subset.
    pub async fn get_blockchain_info(&self) -> Result<BlockchainInfo, RpcError> {
        self.call("getblockchaininfo", json!([])).await
    }

    /// Height of the best validated block.
    pub async fn get_blockchain_height_async(&self) -> Result<u32, RpcError> {
        Ok(self.get_blockchain_info().await?.blocks)
    }

    /// Sum of unspent output values for `address`, in zatoshis.
    pub async fn get_balance(&self, address: &str) -> Result<u64, RpcError> {
        let utxos = self.get_utxos_async(address).await?;
        utxos.iter().try_fold(0u64, |acc, u| {
            acc.checked_add(u.value)
                .ok_or_else(|| RpcError::AmountOverflow(address.to_string()))
        })
    }

    /// Submit a hex-encoded signed transaction. Returns the node's txid.
    pub async fn send_raw_transaction(&self, raw_tx_hex: &str) -> Result<String, RpcError> {
        self.call("sendrawtransaction", json!([raw_tx_hex])).await
    }

    /// Hex-encoded transaction for `txid`.
    pub async fn get_raw_transaction(&self, txid: &str) -> Result<String, RpcError> {
        self.call("getrawtransaction", json!([txid, false])).await
    }

    /// Ask the node whether `address` is valid for its network.
    pub async fn validate_address(&self, address: &str) -> Result<bool, RpcError> {
        let result: ValidateAddressResult = self.call("validateaddress", json!([address])).await?;
        Ok(result.is_valid)
    }

    /// Send one JSON-RPC request and unwrap the envelope.
    async fn call<R>(&self, method: &str, params: Value) -> Result<R, RpcError>
    where
        R: for<'de> Deserialize<'de>,
    {
        #[derive(Serialize)]
        struct Request<'a> {
            jsonrpc: &'a str,
            id: u64,
            method: &'a str,
            params: Value,
        }

        #[derive(Deserialize)]
        struct Envelope<T> {
            result: Option<T>,
            error: Option<ErrorDetail>,
        }

        #[derive(Deserialize)]
        struct ErrorDetail {
            code: i64,
            message: String,
        }

        debug!(method, url = %self.config.url, "rpc request");
        let request = Request {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let resp = self
            .client
            .post(&self.config.url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(&request)
            .send()
            .await?;

        // zcashd reports RPC errors with a 500 status and a JSON body.
        let status = resp.status();
        let body = resp.text().await?;
        let envelope: Envelope<R> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(RpcError::Status {
                    method: method.to_string(),
                    status: status.as_u16(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(err) = envelope.error {
            return Err(RpcError::Node {
                code: err.code,
                message: err.message,
            });
        }
        envelope
            .result
            .ok_or_else(|| RpcError::MissingResult(method.to_string()))
    }
}

/// Drive `fut` to completion from synchronous code.
fn block_on<F, T>(fut: F) -> Result<T, RpcError>
where
    F: std::future::Future<Output = Result<T, RpcError>>,
{
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| handle.block_on(fut))
        }
        Ok(_) => Err(RpcError::Runtime(
            "blocking call from a current-thread runtime".to_string(),
        )),
        Err(_) => {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| RpcError::Runtime(e.to_string()))?;
            rt.block_on(fut)
        }
    }
}

impl UtxoSource for ZcashRpcClient {
    fn get_utxos(&self, address: &str) -> Result<Vec<Utxo>, RpcError> {
        block_on(self.get_utxos_async(address))
    }

    fn get_blockchain_height(&self) -> Result<u32, RpcError> {
        block_on(self.get_blockchain_height_async())
    }
}
