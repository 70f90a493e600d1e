//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use ordbridge_domain::Network;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("wallet.timeout_seconds cannot be 0")]
    InvalidWalletTimeout,

    #[error("node.timeout_seconds cannot be 0")]
    InvalidNodeTimeout,

    #[error("staging.fetch_timeout_seconds cannot be 0")]
    InvalidFetchTimeout,

    #[error("wallet.ord_path cannot be empty")]
    EmptyWalletPath,

    #[error("node.cli_path cannot be empty")]
    EmptyNodePath,

    #[error("wallet.amount_limit_sats cannot be 0")]
    InvalidAmountLimit,
}

/// Wallet tool (ord) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWalletConfig {
    /// Path to the ord executable
    pub ord_path: String,
    /// Default network for wallet operations (overridable per call)
    pub network: Network,
    /// Safety ceiling for send amounts, in satoshis
    pub amount_limit_sats: u64,
    /// Timeout for wallet subprocess invocations, in seconds
    pub timeout_seconds: u64,
}

impl Default for FileWalletConfig {
    fn default() -> Self {
        Self {
            ord_path: "ord".to_string(),
            network: Network::Mainnet,
            amount_limit_sats: 100_000_000,
            timeout_seconds: 120,
        }
    }
}

/// Node RPC client (bitcoin-cli) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNodeConfig {
    /// Path to the bitcoin-cli executable
    pub cli_path: String,
    /// Timeout for node query invocations, in seconds
    pub timeout_seconds: u64,
}

impl Default for FileNodeConfig {
    fn default() -> Self {
        Self {
            cli_path: "bitcoin-cli".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Remote payload staging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStagingConfig {
    /// Timeout for remote fetches during staging, in seconds
    pub fetch_timeout_seconds: u64,
    /// User-Agent header sent with remote fetches
    pub user_agent: String,
}

impl Default for FileStagingConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_seconds: 10,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

/// Uploads directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUploadsConfig {
    /// Directory where normalized images are saved (created if absent)
    pub dir: String,
}

impl Default for FileUploadsConfig {
    fn default() -> Self {
        Self {
            dir: "uploads".to_string(),
        }
    }
}

/// Complete configuration, constructed once at process start.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub wallet: FileWalletConfig,
    pub node: FileNodeConfig,
    pub staging: FileStagingConfig,
    pub uploads: FileUploadsConfig,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.wallet.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidWalletTimeout);
        }
        if self.node.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidNodeTimeout);
        }
        if self.staging.fetch_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidFetchTimeout);
        }
        if self.wallet.ord_path.trim().is_empty() {
            return Err(ConfigValidationError::EmptyWalletPath);
        }
        if self.node.cli_path.trim().is_empty() {
            return Err(ConfigValidationError::EmptyNodePath);
        }
        if self.wallet.amount_limit_sats == 0 {
            return Err(ConfigValidationError::InvalidAmountLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.wallet.ord_path, "ord");
        assert_eq!(config.wallet.network, Network::Mainnet);
        assert_eq!(config.wallet.amount_limit_sats, 100_000_000);
        assert_eq!(config.node.cli_path, "bitcoin-cli");
        assert_eq!(config.staging.fetch_timeout_seconds, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = FileConfig::default();
        config.wallet.timeout_seconds = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidWalletTimeout)
        ));
    }

    #[test]
    fn test_validate_rejects_empty_paths() {
        let mut config = FileConfig::default();
        config.wallet.ord_path = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyWalletPath)
        ));
    }

    #[test]
    fn test_toml_roundtrip() {
        let toml = r#"
            [wallet]
            ord_path = "/usr/local/bin/ord"
            network = "signet"

            [node]
            cli_path = "/usr/local/bin/bitcoin-cli"
        "#;
        let config: FileConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.wallet.ord_path, "/usr/local/bin/ord");
        assert_eq!(config.wallet.network, Network::Signet);
        // Unspecified sections keep their defaults
        assert_eq!(config.wallet.amount_limit_sats, 100_000_000);
        assert_eq!(config.uploads.dir, "uploads");
    }
}
