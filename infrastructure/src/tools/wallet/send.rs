//! Sending bitcoin, behind two-phase confirmation
//!
//! Without `confirm: true` the tool only ever runs a `--dry-run` send and
//! returns the fee estimate alongside a confirmation prompt. The amount
//! ceiling is checked before anything else so an over-limit request is always
//! reported as such, regardless of other argument problems.

use super::{resolve_fee_rate, resolve_network, run_wallet_command};
use crate::config::FileConfig;
use crate::interpret::OutputInterpreter;
use ordbridge_domain::{
    CommandSpec, Network, RiskLevel, ToolCall, ToolDefinition, ToolError, ToolParameter,
    ToolResult,
};
use serde_json::json;
use tracing::info;

pub const WALLET_SEND: &str = "wallet_send";

const DEFAULT_FEE_RATE: u64 = 1;

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        WALLET_SEND,
        "Send bitcoin to an address. Without confirm=true this performs a dry run and returns the fee estimate for confirmation.",
        RiskLevel::High,
    )
    .with_parameter(ToolParameter::new("address", "Destination Bitcoin address", true))
    .with_parameter(
        ToolParameter::new("amount_sats", "Amount to send in satoshis", true).with_type("number"),
    )
    .with_parameter(
        ToolParameter::new(
            "fee_rate",
            "Fee rate in sat/vB (default: 1)",
            false,
        )
        .with_type("number"),
    )
    .with_parameter(ToolParameter::new(
        "network",
        "Bitcoin network: mainnet, testnet or signet (default: configured network)",
        false,
    ))
    .with_parameter(
        ToolParameter::new(
            "confirm",
            "Set to true to broadcast the transaction after reviewing the fee estimate",
            false,
        )
        .with_type("boolean"),
    )
}

pub fn execute(
    config: &FileConfig,
    interpreter: &dyn OutputInterpreter,
    call: &ToolCall,
) -> ToolResult {
    // Amount first: an over-limit request must always say so.
    let amount_sats = match call.get_u64("amount_sats").filter(|a| *a > 0) {
        Some(a) => a,
        None => return ToolResult::failure(&call.tool_name, ToolError::invalid_amount()),
    };
    if amount_sats > config.wallet.amount_limit_sats {
        return ToolResult::failure(
            &call.tool_name,
            ToolError::amount_exceeds_limit(config.wallet.amount_limit_sats),
        );
    }

    let address = match call.get_string("address").filter(|a| !a.trim().is_empty()) {
        Some(a) => a.to_string(),
        None => return ToolResult::failure(&call.tool_name, ToolError::invalid_address()),
    };

    let fee_rate = match resolve_fee_rate(call, DEFAULT_FEE_RATE) {
        Ok(r) => r,
        Err(e) => return ToolResult::failure(&call.tool_name, e),
    };

    let network = match resolve_network(call, config) {
        Ok(n) => n,
        Err(e) => return ToolResult::failure(&call.tool_name, e),
    };

    let confirmed = call.get_bool("confirm").unwrap_or(false);
    if !confirmed {
        // Phase one: forced dry run, never a broadcast.
        let dry = send_from_wallet(
            config,
            interpreter,
            &call.tool_name,
            &address,
            amount_sats,
            fee_rate,
            network,
            true,
        );
        if !dry.is_success() {
            return dry;
        }
        let fee_estimate = dry
            .output()
            .and_then(|o| o.get("output"))
            .cloned()
            .unwrap_or(json!(null));
        return ToolResult::success(
            &call.tool_name,
            json!({
                "confirmation_required": true,
                "fee_estimate": fee_estimate,
                "message": "This was a dry run. Review the fee estimate above and call again with confirm=true to broadcast the transaction.",
            }),
        );
    }

    send_from_wallet(
        config,
        interpreter,
        &call.tool_name,
        &address,
        amount_sats,
        fee_rate,
        network,
        false,
    )
}

/// Run a single `ord wallet send`, dry or real, against validated parameters.
#[allow(clippy::too_many_arguments)]
fn send_from_wallet(
    config: &FileConfig,
    interpreter: &dyn OutputInterpreter,
    tool_name: &str,
    address: &str,
    amount_sats: u64,
    fee_rate: u64,
    network: Network,
    dry_run: bool,
) -> ToolResult {
    let spec = CommandSpec::new(&config.wallet.ord_path)
        .network(network)
        .subcommand(["wallet", "send"])
        .fee_rate(fee_rate)
        .dry_run(dry_run)
        .positional(address)
        .positional(format!("{}sat", amount_sats));

    let stdout = match run_wallet_command(config, &spec) {
        Ok(out) => out,
        Err(e) => return ToolResult::failure(tool_name, e),
    };

    if dry_run {
        info!(address, amount_sats, %network, "dry-run send completed");
    } else {
        info!(address, amount_sats, %network, "transaction broadcast");
    }

    let mut body = json!({
        "success": true,
        "address": address,
        "amount_sats": amount_sats,
        "network": network.as_str(),
        "output": stdout,
        "dry_run": dry_run,
    });
    if let Some(txid) = interpreter.extract_txid(&stdout) {
        body["txid"] = json!(txid);
    }
    ToolResult::success(tool_name, body)
}
