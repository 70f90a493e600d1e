//! Wallet balance query

use super::{resolve_network, run_wallet_command};
use crate::config::FileConfig;
use crate::interpret::OutputInterpreter;
use ordbridge_domain::{
    CommandSpec, RiskLevel, ToolCall, ToolDefinition, ToolParameter, ToolResult,
};
use serde_json::{Map, Value, json};

pub const WALLET_BALANCE: &str = "wallet_balance";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        WALLET_BALANCE,
        "Get the wallet balance, including cardinal (spendable) and ordinal (inscription-bound) sub-balances where reported.",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new(
        "network",
        "Bitcoin network: mainnet, testnet or signet (default: configured network)",
        false,
    ))
}

pub fn execute(
    config: &FileConfig,
    interpreter: &dyn OutputInterpreter,
    call: &ToolCall,
) -> ToolResult {
    let network = match resolve_network(call, config) {
        Ok(n) => n,
        Err(e) => return ToolResult::failure(&call.tool_name, e),
    };

    let spec = CommandSpec::new(&config.wallet.ord_path)
        .network(network)
        .subcommand(["wallet", "balance"]);

    let stdout = match run_wallet_command(config, &spec) {
        Ok(out) => out,
        Err(e) => return ToolResult::failure(&call.tool_name, e),
    };

    let reading = interpreter.parse_balance(&stdout);
    let mut parsed = Map::new();
    if let Some(total) = reading.total_sats {
        parsed.insert("total_balance_sats".to_string(), json!(total));
    }
    if let Some(cardinal) = reading.cardinal_sats {
        parsed.insert("cardinal_balance_sats".to_string(), json!(cardinal));
    }
    if let Some(ordinal) = reading.ordinal_sats {
        parsed.insert("ordinal_balance_sats".to_string(), json!(ordinal));
    }
    if let Some(btc) = reading.total_btc() {
        parsed.insert("total_balance_btc".to_string(), json!(btc));
    }

    ToolResult::success(
        &call.tool_name,
        json!({
            "success": true,
            "network": network.as_str(),
            "raw_output": stdout,
            "parsed": Value::Object(parsed),
        }),
    )
}
