//! Wallet transaction history

use super::{resolve_network, run_wallet_command};
use crate::config::FileConfig;
use crate::interpret::OutputInterpreter;
use ordbridge_domain::{
    CommandSpec, RiskLevel, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult,
};
use serde_json::json;

pub const WALLET_TRANSACTIONS: &str = "wallet_transactions";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        WALLET_TRANSACTIONS,
        "List the wallet's transactions, most recent first where the wallet reports them that way.",
        RiskLevel::Low,
    )
    .with_parameter(
        ToolParameter::new(
            "limit",
            "Maximum number of transactions to return (default: all)",
            false,
        )
        .with_type("number"),
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
    let limit = if call.has_arg("limit") {
        match call.get_u64("limit").filter(|l| *l > 0) {
            Some(l) => Some(l as usize),
            None => return ToolResult::failure(&call.tool_name, ToolError::invalid_limit()),
        }
    } else {
        None
    };

    let network = match resolve_network(call, config) {
        Ok(n) => n,
        Err(e) => return ToolResult::failure(&call.tool_name, e),
    };

    let spec = CommandSpec::new(&config.wallet.ord_path)
        .network(network)
        .subcommand(["wallet", "transactions"]);

    let stdout = match run_wallet_command(config, &spec) {
        Ok(out) => out,
        Err(e) => return ToolResult::failure(&call.tool_name, e),
    };

    // Structured output first; fall back to raw text split on blank lines.
    if let Some((transactions, count)) = interpreter.parse_json(&stdout, limit) {
        return ToolResult::success(
            &call.tool_name,
            json!({
                "success": true,
                "network": network.as_str(),
                "transactions": transactions,
                "count": count,
            }),
        );
    }

    let mut body = json!({
        "success": true,
        "network": network.as_str(),
        "raw_output": stdout,
        "parsing_note": "Output could not be parsed as JSON",
    });
    if let Some(limit) = limit {
        let split = interpreter.split_entries(&stdout, limit);
        if split.truncated {
            body["raw_output"] = json!(split.text);
            body["truncated"] = json!(true);
            body["total_transactions"] = json!(split.total);
        }
    }
    ToolResult::success(&call.tool_name, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret::DefaultInterpreter;

    #[test]
    fn test_zero_limit_rejected() {
        let config = FileConfig::default();
        let call = ToolCall::new(WALLET_TRANSACTIONS).with_arg("limit", 0);
        let result = execute(&config, &DefaultInterpreter, &call);
        assert_eq!(result.error().unwrap().code, "INVALID_LIMIT");
    }

    #[test]
    fn test_negative_limit_rejected() {
        let config = FileConfig::default();
        let call = ToolCall::new(WALLET_TRANSACTIONS).with_arg("limit", -3);
        let result = execute(&config, &DefaultInterpreter, &call);
        assert_eq!(result.error().unwrap().code, "INVALID_LIMIT");
    }

    #[test]
    fn test_absent_limit_is_valid() {
        let mut config = FileConfig::default();
        config.wallet.ord_path = "definitely-not-ord".to_string();
        let call = ToolCall::new(WALLET_TRANSACTIONS);
        let result = execute(&config, &DefaultInterpreter, &call);
        // Validation passed; failure is the missing binary, not the limit.
        assert_eq!(result.error().unwrap().code, "UNREACHABLE_COLLABORATOR");
    }
}
