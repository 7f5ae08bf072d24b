//! Two-phase transaction builder.
//!
//! A [`TransactionBuilder`] collects inputs and outputs for one network,
//! prices the transaction with the fixed fee model, adds change, and asks a
//! [`ConsensusEngine`] for the sighashes to sign. [`TransactionBuilder::sign`]
//! then hands the signatures back to the engine for the final bytes.
//!
//! ```text
//! Empty --add_input/add_output--> Accumulating --build--> Built --sign--> SignedTransaction
//!   ^                                  |
//!   +------------- clear --------------+
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use zec_primitives::hash::sha256;
use zec_script::address::is_valid;
use zec_script::{Network, Script};

use crate::engine::{ConsensusEngine, DraftOutput, DraftTransaction};
use crate::fee::estimate_fee;
use crate::selector::select;
use crate::signer::{sign_sighashes, SighashSigner};
use crate::utxo::{sum_values, total_memo_len, TxOutput, Utxo, ValidUtxo, MAX_MONEY};
use crate::TransactionError;

/// Default fee rate, in zatoshis per byte.
pub const DEFAULT_FEE_RATE: u64 = 10;

/// Default dust threshold in zatoshis.
pub const DEFAULT_DUST_THRESHOLD: u64 = 546;

/// Blocks after the build height at which a transaction expires by default.
pub const DEFAULT_EXPIRY_DELTA: u32 = 40;

/// Builder settings that survive [`TransactionBuilder::clear`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Recorded and reported; the fixed fee model does not scale with it.
    pub fee_rate: u64,
    pub dust_threshold: u64,
    pub change_address: Option<String>,
    /// Explicit expiry height. `None` means build height + 40.
    pub expiry_height: Option<u32>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            fee_rate: DEFAULT_FEE_RATE,
            dust_threshold: DEFAULT_DUST_THRESHOLD,
            change_address: None,
            expiry_height: None,
        }
    }
}

/// How [`TransactionBuilder::select_utxos`] picks inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionStrategy {
    /// Largest first until outputs plus fee are covered.
    #[default]
    Accumulative,
    /// Spend every candidate.
    All,
}

/// Lifecycle position of a builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuilderState {
    Empty,
    Accumulating,
    Built,
}

/// An engine-prepared transaction waiting for signatures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsignedTransaction {
    pub version: u32,
    pub inputs: Vec<ValidUtxo>,
    /// Final outputs, change included.
    pub outputs: Vec<DraftOutput>,
    pub lock_time: u32,
    /// One digest per input, in input order.
    pub sighashes: Vec<[u8; 32]>,
    pub height: u32,
    pub expiry_height: u32,
}

impl UnsignedTransaction {
    /// The draft the engine needs to merge signatures.
    pub fn to_draft(&self) -> DraftTransaction {
        DraftTransaction {
            height: self.height,
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            expiry_height: self.expiry_height,
            version: self.version,
            sighashes: self.sighashes.clone(),
        }
    }
}

/// Result of [`TransactionBuilder::build`].
///
/// `total_input == total_output + fee` always holds; `total_output`
/// includes the change output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildResult {
    pub unsigned_tx: UnsignedTransaction,
    pub fee: u64,
    pub total_input: u64,
    pub total_output: u64,
    /// Value of the change output, 0 when none was added.
    pub change_amount: u64,
}

/// A fully signed, serialized transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    pub raw_tx: Vec<u8>,
    /// Hex SHA-256 of `raw_tx`.
    pub txid: String,
    pub fee: u64,
    pub total_input: u64,
    pub total_output: u64,
    pub change_amount: u64,
}

impl SignedTransaction {
    pub fn raw_hex(&self) -> String {
        hex::encode(&self.raw_tx)
    }
}

/// Read-only view of a builder for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BuilderSnapshot {
    pub network: Network,
    pub state: BuilderState,
    pub input_count: usize,
    pub output_count: usize,
    /// Saturating sum of input values.
    pub total_input: u64,
    /// Saturating sum of output values.
    pub total_output: u64,
    pub change_address: Option<String>,
    pub fee_rate: u64,
    pub dust_threshold: u64,
    pub expiry_height: Option<u32>,
}

/// Builds transparent transactions for a single network.
///
/// Setters validate eagerly and return `&mut Self` so calls can be chained
/// with `?`. Cloning gives an independent builder.
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    network: Network,
    inputs: Vec<Utxo>,
    outputs: Vec<TxOutput>,
    config: BuilderConfig,
    built: bool,
}

impl TransactionBuilder {
    /// Create an empty builder with default settings.
    pub fn new(network: Network) -> Self {
        TransactionBuilder {
            network,
            inputs: Vec::new(),
            outputs: Vec::new(),
            config: BuilderConfig::default(),
            built: false,
        }
    }

    /// Create an empty builder, validating `config` as the setters would.
    pub fn with_config(network: Network, config: BuilderConfig) -> Result<Self, TransactionError> {
        let mut builder = Self::new(network);
        builder.set_fee_rate(config.fee_rate)?;
        builder.set_dust_threshold(config.dust_threshold)?;
        if let Some(addr) = config.change_address.as_deref() {
            builder.set_change_address(addr)?;
        }
        builder.config.expiry_height = config.expiry_height;
        Ok(builder)
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn inputs(&self) -> &[Utxo] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TxOutput] {
        &self.outputs
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn state(&self) -> BuilderState {
        if self.built {
            BuilderState::Built
        } else if self.inputs.is_empty() && self.outputs.is_empty() {
            BuilderState::Empty
        } else {
            BuilderState::Accumulating
        }
    }

    /// Append an input. Its script is checked at build time, not here.
    pub fn add_input(&mut self, utxo: Utxo) -> &mut Self {
        self.built = false;
        self.inputs.push(utxo);
        self
    }

    pub fn add_inputs<I: IntoIterator<Item = Utxo>>(&mut self, utxos: I) -> &mut Self {
        self.built = false;
        self.inputs.extend(utxos);
        self
    }

    /// Append an output paying `value` to `address`.
    ///
    /// # Returns
    /// `InvalidAddress` if the address is malformed or for another network,
    /// `InvalidAmount` above `MAX_MONEY`, `MissingMemo` for a zero value
    /// without a memo, or a `MemoTooLong` script error.
    pub fn add_output(
        &mut self,
        address: &str,
        value: u64,
        memo: Option<&[u8]>,
    ) -> Result<&mut Self, TransactionError> {
        self.check_address(address)?;
        if value > MAX_MONEY {
            return Err(TransactionError::InvalidAmount(value));
        }
        let memo = memo.filter(|m| !m.is_empty());
        match memo {
            Some(m) => {
                Script::memo(m)?;
            }
            None if value == 0 => return Err(TransactionError::MissingMemo),
            None => {}
        }

        self.built = false;
        self.outputs.push(TxOutput {
            address: address.to_string(),
            value,
            memo: memo.map(<[u8]>::to_vec),
        });
        Ok(self)
    }

    pub fn set_change_address(&mut self, address: &str) -> Result<&mut Self, TransactionError> {
        self.check_address(address)?;
        self.config.change_address = Some(address.to_string());
        Ok(self)
    }

    pub fn set_fee_rate(&mut self, fee_rate: u64) -> Result<&mut Self, TransactionError> {
        if fee_rate == 0 {
            return Err(TransactionError::InvalidFeeRate(fee_rate));
        }
        self.config.fee_rate = fee_rate;
        Ok(self)
    }

    pub fn set_dust_threshold(&mut self, threshold: u64) -> Result<&mut Self, TransactionError> {
        if threshold > MAX_MONEY {
            return Err(TransactionError::InvalidThreshold(threshold));
        }
        self.config.dust_threshold = threshold;
        Ok(self)
    }

    /// Set an explicit expiry height. `0` means the transaction never expires.
    pub fn set_expiry_height(&mut self, height: u32) -> &mut Self {
        self.config.expiry_height = Some(height);
        self
    }

    /// Drop all inputs and outputs. Configuration is kept.
    pub fn clear(&mut self) -> &mut Self {
        self.inputs.clear();
        self.outputs.clear();
        self.built = false;
        self
    }

    /// Replace the inputs with a selection from `candidates`.
    ///
    /// `Accumulative` needs the outputs to be added first.
    pub fn select_utxos(
        &mut self,
        candidates: &[Utxo],
        strategy: SelectionStrategy,
    ) -> Result<&mut Self, TransactionError> {
        let inputs = match strategy {
            SelectionStrategy::All => candidates.to_vec(),
            SelectionStrategy::Accumulative => {
                let selection = select(
                    candidates,
                    &self.outputs,
                    self.config.change_address.as_deref(),
                    self.config.dust_threshold,
                )?;
                debug!(
                    selected = selection.inputs.len(),
                    candidates = candidates.len(),
                    fee = selection.fee,
                    "selected utxos"
                );
                selection.inputs.into_iter().map(Utxo::from).collect()
            }
        };
        self.built = false;
        self.inputs = inputs;
        Ok(self)
    }

    /// Price the transaction, add change, and obtain sighashes from `engine`.
    ///
    /// # Arguments
    /// * `engine` - The consensus-serialization engine.
    /// * `block_height` - Current chain height.
    /// * `public_key` - SEC1 public key owning the inputs.
    ///
    /// # Returns
    /// A `BuildResult`, or `NoInputs`, `NoOutputs`, `MissingScript`,
    /// `InsufficientFunds`, or an engine error.
    pub fn build<E: ConsensusEngine + ?Sized>(
        &mut self,
        engine: &E,
        block_height: u32,
        public_key: &[u8],
    ) -> Result<BuildResult, TransactionError> {
        if self.inputs.is_empty() {
            return Err(TransactionError::NoInputs);
        }
        if self.outputs.is_empty() {
            return Err(TransactionError::NoOutputs);
        }
        let inputs = self
            .inputs
            .iter()
            .map(Utxo::to_valid)
            .collect::<Result<Vec<_>, _>>()?;

        let total_input = sum_values(inputs.iter().map(|u| u.value))?;
        let payments = sum_values(self.outputs.iter().map(|o| o.value))?;

        let change_address = self.config.change_address.as_deref();
        let slots = self.outputs.len() + usize::from(change_address.is_some());
        let fee = estimate_fee(inputs.len(), slots, total_memo_len(&self.outputs));

        let needed = payments
            .checked_add(fee)
            .ok_or(TransactionError::InvalidAmount(fee))?;
        if total_input < needed {
            return Err(TransactionError::InsufficientFunds {
                needed,
                available: total_input,
            });
        }

        let leftover = total_input - needed;
        let mut outputs = self.outputs.clone();
        let (fee, change_amount) = match change_address {
            Some(addr) if leftover > self.config.dust_threshold => {
                outputs.push(TxOutput::new(addr, leftover));
                (fee, leftover)
            }
            _ => {
                if leftover > 0 {
                    warn!(
                        leftover,
                        dust_threshold = self.config.dust_threshold,
                        "folding leftover into fee"
                    );
                }
                (fee + leftover, 0)
            }
        };
        let total_output = payments + change_amount;

        let expiry_height = self
            .config
            .expiry_height
            .unwrap_or_else(|| block_height.saturating_add(DEFAULT_EXPIRY_DELTA));

        let mut draft = DraftTransaction {
            height: block_height,
            inputs,
            outputs: outputs
                .iter()
                .map(DraftOutput::from_output)
                .collect::<Result<Vec<_>, _>>()?,
            expiry_height,
            version: 0,
            sighashes: Vec::new(),
        };

        debug!(
            network = %self.network,
            inputs = draft.inputs.len(),
            outputs = draft.outputs.len(),
            "requesting sighashes from engine"
        );
        let engine_draft = engine.build_draft(public_key, &draft, self.network)?;
        if engine_draft.sighashes.len() != draft.inputs.len() {
            return Err(TransactionError::Engine(format!(
                "engine returned {} sighashes for {} inputs",
                engine_draft.sighashes.len(),
                draft.inputs.len()
            )));
        }
        draft.version = engine_draft.version;
        draft.sighashes = engine_draft.sighashes;

        info!(
            total_input,
            total_output,
            fee,
            change_amount,
            expiry_height,
            "built transaction"
        );
        self.built = true;

        Ok(BuildResult {
            unsigned_tx: UnsignedTransaction {
                version: draft.version,
                inputs: draft.inputs,
                outputs: draft.outputs,
                lock_time: 0,
                sighashes: draft.sighashes,
                height: draft.height,
                expiry_height: draft.expiry_height,
            },
            fee,
            total_input,
            total_output,
            change_amount,
        })
    }

    /// Merge one DER signature per input and serialize via `engine`.
    ///
    /// # Returns
    /// The `SignedTransaction` with accounting copied from `build_result`,
    /// or `SignatureCountMismatch` / an engine error.
    pub fn sign<E: ConsensusEngine + ?Sized>(
        engine: &E,
        build_result: &BuildResult,
        signatures: &[Vec<u8>],
        network: Network,
        public_key: &[u8],
    ) -> Result<SignedTransaction, TransactionError> {
        let expected = build_result.unsigned_tx.inputs.len();
        if signatures.len() != expected {
            return Err(TransactionError::SignatureCountMismatch {
                expected,
                actual: signatures.len(),
            });
        }

        debug!(%network, signatures = signatures.len(), "applying signatures");
        let draft = build_result.unsigned_tx.to_draft();
        let raw_tx = engine.apply_signatures(public_key, &draft, signatures, network)?;
        let txid = hex::encode(sha256(&raw_tx));
        info!(%txid, bytes = raw_tx.len(), "signed transaction");

        Ok(SignedTransaction {
            raw_tx,
            txid,
            fee: build_result.fee,
            total_input: build_result.total_input,
            total_output: build_result.total_output,
            change_amount: build_result.change_amount,
        })
    }

    /// Sign every sighash with `signer`, then [`sign`](Self::sign).
    pub fn sign_with<E, S>(
        engine: &E,
        build_result: &BuildResult,
        signer: &S,
        network: Network,
        public_key: &[u8],
    ) -> Result<SignedTransaction, TransactionError>
    where
        E: ConsensusEngine + ?Sized,
        S: SighashSigner + ?Sized,
    {
        let signatures = sign_sighashes(&build_result.unsigned_tx.sighashes, signer)?;
        Self::sign(engine, build_result, &signatures, network, public_key)
    }

    pub fn snapshot(&self) -> BuilderSnapshot {
        BuilderSnapshot {
            network: self.network,
            state: self.state(),
            input_count: self.inputs.len(),
            output_count: self.outputs.len(),
            total_input: self.inputs.iter().fold(0u64, |acc, u| acc.saturating_add(u.value)),
            total_output: self.outputs.iter().fold(0u64, |acc, o| acc.saturating_add(o.value)),
            change_address: self.config.change_address.clone(),
            fee_rate: self.config.fee_rate,
            dust_threshold: self.config.dust_threshold,
            expiry_height: self.config.expiry_height,
        }
    }

    fn check_address(&self, address: &str) -> Result<(), TransactionError> {
        if is_valid(address, self.network) {
            Ok(())
        } else {
            Err(TransactionError::InvalidAddress(format!(
                "{} is not a {} address",
                address, self.network
            )))
        }
    }
}
