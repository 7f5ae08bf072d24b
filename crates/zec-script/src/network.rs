//! Network identity and alias canonicalization.
//!
//! Every place that cares about network identity (address prefixes,
//! consensus engine calls) goes through [`Network`], and every string
//! alias is parsed by its single `FromStr` implementation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ScriptError;

/// Two-byte transparent P2PKH prefix for mainnet ("t1" addresses).
pub const MAINNET_P2PKH_PREFIX: [u8; 2] = [0x1c, 0xb8];
/// Two-byte transparent P2PKH prefix for testnet and regtest ("tm" addresses).
pub const TESTNET_P2PKH_PREFIX: [u8; 2] = [0x1d, 0x25];

/// Zcash network the transaction is built for.
///
/// Test and Regtest share address prefixes but are distinct identifiers
/// for the consensus engine (different activation heights).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Main,
    Test,
    Regtest,
}

impl Network {
    /// All networks, in declaration order.
    pub const ALL: [Network; 3] = [Network::Main, Network::Test, Network::Regtest];

    /// Transparent P2PKH prefix bytes for this network.
    pub fn address_prefix(&self) -> [u8; 2] {
        match self {
            Network::Main => MAINNET_P2PKH_PREFIX,
            Network::Test | Network::Regtest => TESTNET_P2PKH_PREFIX,
        }
    }

    /// Identifier handed to the consensus engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Main => "Main",
            Network::Test => "Test",
            Network::Regtest => "Regtest",
        }
    }
}

impl FromStr for Network {
    type Err = ScriptError;

    /// Canonicalize a case-insensitive network alias.
    ///
    /// `main`/`mainnet` → Main, `test`/`testnet` → Test, `regtest` → Regtest.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Test),
            "regtest" => Ok(Network::Regtest),
            _ => Err(ScriptError::UnknownNetwork(s.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_canonicalize() {
        for (alias, expected) in [
            ("main", Network::Main),
            ("MainNet", Network::Main),
            ("mainnet", Network::Main),
            ("test", Network::Test),
            ("TESTNET", Network::Test),
            ("regtest", Network::Regtest),
            (" Regtest ", Network::Regtest),
        ] {
            assert_eq!(alias.parse::<Network>().unwrap(), expected, "alias {alias}");
        }
    }

    #[test]
    fn test_unknown_alias_rejected() {
        assert!(matches!(
            "signet".parse::<Network>(),
            Err(ScriptError::UnknownNetwork(_))
        ));
    }

    #[test]
    fn test_display_is_engine_identifier() {
        assert_eq!(Network::Main.to_string(), "Main");
        assert_eq!(Network::Test.to_string(), "Test");
        assert_eq!(Network::Regtest.to_string(), "Regtest");
    }

    #[test]
    fn test_test_and_regtest_share_prefix() {
        assert_eq!(Network::Test.address_prefix(), Network::Regtest.address_prefix());
        assert_ne!(Network::Main.address_prefix(), Network::Test.address_prefix());
    }
}
