//! Wallet tools over the ord CLI
//!
//! All wallet operations share the same invocation shape:
//! `ord [--testnet|--signet] wallet <subcommand> [options…]`. Parameters are
//! validated here before any subprocess is started, and a non-zero exit code
//! is terminal: the error envelope carries the tool's stderr and the full
//! command line.

pub mod balance;
pub mod inscribe;
pub mod send;
pub mod transactions;

use crate::config::FileConfig;
use crate::process::{self, InvokeError};
use ordbridge_domain::{CommandSpec, Network, ToolCall, ToolError};
use std::time::Duration;

/// Whether the ord wallet binary can be located at all.
pub fn wallet_cli_available(config: &FileConfig) -> bool {
    which::which(&config.wallet.ord_path).is_ok()
}

/// Resolve the network for a call: explicit argument wins, otherwise the
/// configured default.
pub(crate) fn resolve_network(call: &ToolCall, config: &FileConfig) -> Result<Network, ToolError> {
    if !call.has_arg("network") {
        return Ok(config.wallet.network);
    }
    match call.get_string("network") {
        Some(name) => name.parse().map_err(|_| ToolError::invalid_network(name)),
        None => Err(ToolError::invalid_network(
            call.arguments
                .get("network")
                .map(|v| v.to_string())
                .unwrap_or_default(),
        )),
    }
}

/// Resolve an optional positive fee rate, falling back to the tool default.
pub(crate) fn resolve_fee_rate(call: &ToolCall, default: u64) -> Result<u64, ToolError> {
    if !call.has_arg("fee_rate") {
        return Ok(default);
    }
    call.get_u64("fee_rate")
        .filter(|rate| *rate > 0)
        .ok_or_else(ToolError::invalid_fee_rate)
}

/// Run a wallet command to completion, returning trimmed stdout.
///
/// Every failure mode (unreachable binary, timeout, non-zero exit) is mapped
/// to a [`ToolError`] carrying the assembled command line.
pub(crate) fn run_wallet_command(
    config: &FileConfig,
    spec: &CommandSpec,
) -> Result<String, ToolError> {
    let command_line = spec.display_line();
    let result = process::invoke(spec, Duration::from_secs(config.wallet.timeout_seconds))
        .map_err(|e| match e {
            InvokeError::Unreachable(_) => {
                ToolError::unreachable(e.to_string()).with_command(command_line.clone())
            }
            InvokeError::Timeout { .. } => {
                ToolError::timeout(e.to_string()).with_command(command_line.clone())
            }
            other => {
                ToolError::process_failure(other.to_string()).with_command(command_line.clone())
            }
        })?;

    if !result.success() {
        return Err(ToolError::process_failure(format!(
            "Ord command failed: {}",
            result.error_message()
        ))
        .with_command(command_line));
    }

    Ok(result.stdout.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_network_defaults_to_config() {
        let mut config = FileConfig::default();
        config.wallet.network = Network::Signet;
        let call = ToolCall::new("wallet_balance");
        assert_eq!(resolve_network(&call, &config).unwrap(), Network::Signet);
    }

    #[test]
    fn test_resolve_network_argument_overrides() {
        let config = FileConfig::default();
        let call = ToolCall::new("wallet_balance").with_arg("network", "testnet");
        assert_eq!(resolve_network(&call, &config).unwrap(), Network::Testnet);
    }

    #[test]
    fn test_resolve_network_rejects_unknown() {
        let config = FileConfig::default();
        let call = ToolCall::new("wallet_balance").with_arg("network", "regtest");
        let err = resolve_network(&call, &config).unwrap_err();
        assert_eq!(err.code, "INVALID_NETWORK");
    }

    #[test]
    fn test_resolve_fee_rate_default_and_override() {
        let call = ToolCall::new("wallet_send");
        assert_eq!(resolve_fee_rate(&call, 1).unwrap(), 1);

        let call = ToolCall::new("wallet_send").with_arg("fee_rate", 25);
        assert_eq!(resolve_fee_rate(&call, 1).unwrap(), 25);
    }

    #[test]
    fn test_resolve_fee_rate_rejects_non_positive() {
        let call = ToolCall::new("wallet_send").with_arg("fee_rate", 0);
        assert_eq!(resolve_fee_rate(&call, 1).unwrap_err().code, "INVALID_FEE_RATE");

        let call = ToolCall::new("wallet_send").with_arg("fee_rate", -5);
        assert_eq!(resolve_fee_rate(&call, 1).unwrap_err().code, "INVALID_FEE_RATE");
    }
}
