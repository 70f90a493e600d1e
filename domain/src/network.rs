//! Bitcoin network selection
//!
//! The wallet CLI addresses mainnet implicitly; testnet and signet are
//! selected with a dedicated flag placed before the subcommand.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a network name is not one of the accepted values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid network '{0}', must be one of: mainnet, testnet, signet")]
pub struct InvalidNetwork(pub String);

/// The Bitcoin network a wallet operation runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Signet,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Testnet, Network::Signet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Signet => "signet",
        }
    }

    /// CLI selector understood by the wallet tool. Mainnet needs no flag.
    pub fn flag(&self) -> Option<&'static str> {
        match self {
            Network::Mainnet => None,
            Network::Testnet => Some("--testnet"),
            Network::Signet => Some("--signet"),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Network {
    type Err = InvalidNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "signet" => Ok(Network::Signet),
            other => Err(InvalidNetwork(other.to_string())),
        }
    }
}
