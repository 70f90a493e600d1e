//! Node query tools over the RPC client binary
//!
//! Each tool issues exactly one `bitcoin-cli <command> [args…]` invocation
//! and surfaces the result as-is: JSON output is parsed and returned
//! unmodified, scalar output (e.g. a block hash) is returned as a JSON
//! string. Errors from the node are surfaced in the error envelope without
//! interpretation.

use crate::config::FileConfig;
use crate::process::{self, InvokeError};
use ordbridge_domain::{
    CommandSpec, RiskLevel, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult,
};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::warn;

/// Tool name constants
pub const GET_BLOCKCHAIN_INFO: &str = "get_blockchain_info";
pub const GET_NETWORK_INFO: &str = "get_network_info";
pub const GET_BLOCK_HASH: &str = "get_block_hash";
pub const GET_BLOCK: &str = "get_block";
pub const ESTIMATE_SMART_FEE: &str = "estimate_smart_fee";

const FEE_ESTIMATE_MODES: [&str; 3] = ["UNSET", "ECONOMICAL", "CONSERVATIVE"];

pub fn blockchain_info_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_BLOCKCHAIN_INFO,
        "Get information about the current state of the blockchain: chain, blocks, headers, difficulty and related metrics.",
        RiskLevel::Low,
    )
}

pub fn network_info_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_NETWORK_INFO,
        "Get information about the node's network connections and settings.",
        RiskLevel::Low,
    )
}

pub fn block_hash_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_BLOCK_HASH,
        "Get the block hash for a specific block height.",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new("height", "Block height", true).with_type("number"))
}

pub fn block_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_BLOCK,
        "Get block data for a specific block hash.",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new("blockhash", "The hash of the block to get", true))
    .with_parameter(
        ToolParameter::new("verbosity", "Verbosity level (0-2, default: 1)", false)
            .with_type("number"),
    )
}

pub fn estimate_smart_fee_definition() -> ToolDefinition {
    ToolDefinition::new(
        ESTIMATE_SMART_FEE,
        "Estimate the fee rate needed for confirmation within a target number of blocks.",
        RiskLevel::Low,
    )
    .with_parameter(
        ToolParameter::new("conf_target", "Confirmation target in blocks", true)
            .with_type("number"),
    )
    .with_parameter(ToolParameter::new(
        "estimate_mode",
        "Fee estimate mode: UNSET, ECONOMICAL or CONSERVATIVE (default: CONSERVATIVE)",
        false,
    ))
}

pub fn execute_blockchain_info(config: &FileConfig, call: &ToolCall) -> ToolResult {
    run_query(config, &call.tool_name, &["getblockchaininfo"], &[])
}

pub fn execute_network_info(config: &FileConfig, call: &ToolCall) -> ToolResult {
    run_query(config, &call.tool_name, &["getnetworkinfo"], &[])
}

pub fn execute_block_hash(config: &FileConfig, call: &ToolCall) -> ToolResult {
    let height = match call.get_u64("height") {
        Some(h) => h,
        None => {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::invalid_argument("height must be a non-negative integer"),
            );
        }
    };
    run_query(
        config,
        &call.tool_name,
        &["getblockhash"],
        &[height.to_string()],
    )
}

pub fn execute_block(config: &FileConfig, call: &ToolCall) -> ToolResult {
    let blockhash = match call.require_string("blockhash") {
        Ok(h) => h,
        Err(e) => return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(e)),
    };
    let verbosity = call.get_u64("verbosity").unwrap_or(1);
    if call.has_arg("verbosity") && (call.get_u64("verbosity").is_none() || verbosity > 2) {
        return ToolResult::failure(
            &call.tool_name,
            ToolError::invalid_argument("verbosity must be 0, 1 or 2"),
        );
    }
    run_query(
        config,
        &call.tool_name,
        &["getblock"],
        &[blockhash.to_string(), verbosity.to_string()],
    )
}

pub fn execute_estimate_smart_fee(config: &FileConfig, call: &ToolCall) -> ToolResult {
    let conf_target = match call.get_u64("conf_target").filter(|t| *t > 0) {
        Some(t) => t,
        None => {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::invalid_argument("conf_target must be a positive integer"),
            );
        }
    };
    let mode = call.get_string("estimate_mode").unwrap_or("CONSERVATIVE");
    if !FEE_ESTIMATE_MODES.contains(&mode) {
        return ToolResult::failure(
            &call.tool_name,
            ToolError::invalid_argument(format!(
                "estimate_mode must be one of: {}",
                FEE_ESTIMATE_MODES.join(", ")
            )),
        );
    }
    run_query(
        config,
        &call.tool_name,
        &["estimatesmartfee"],
        &[conf_target.to_string(), mode.to_string()],
    )
}

/// Availability probe used at startup: runs `getblockchaininfo` and returns
/// the parsed result, or the error to log. Never fatal to the caller.
pub fn connection_info(config: &FileConfig) -> Result<Value, ToolError> {
    let spec = CommandSpec::new(&config.node.cli_path).subcommand(["getblockchaininfo"]);
    let output = run_command(config, spec)?;
    Ok(parse_output(&output))
}

/// Whether the node RPC client binary can be located at all.
pub fn node_cli_available(config: &FileConfig) -> bool {
    which::which(&config.node.cli_path).is_ok()
}

fn run_query(
    config: &FileConfig,
    tool_name: &str,
    command_words: &[&str],
    positional: &[String],
) -> ToolResult {
    let mut spec = CommandSpec::new(&config.node.cli_path)
        .subcommand(command_words.iter().copied());
    for arg in positional {
        spec = spec.positional(arg);
    }

    match run_command(config, spec) {
        Ok(output) => ToolResult::success(tool_name, parse_output(&output)),
        Err(error) => ToolResult::failure(tool_name, error),
    }
}

fn run_command(config: &FileConfig, spec: CommandSpec) -> Result<String, ToolError> {
    let command_line = spec.display_line();
    let result = process::invoke(&spec, Duration::from_secs(config.node.timeout_seconds))
        .map_err(|e| match e {
            InvokeError::Unreachable(_) => {
                ToolError::unreachable(e.to_string()).with_command(command_line.clone())
            }
            InvokeError::Timeout { .. } => {
                ToolError::timeout(e.to_string()).with_command(command_line.clone())
            }
            other => ToolError::process_failure(other.to_string()).with_command(command_line.clone()),
        })?;

    if !result.success() {
        return Err(ToolError::process_failure(format!(
            "Node command failed: {}",
            result.error_message()
        ))
        .with_command(command_line));
    }

    Ok(result.stdout.trim().to_string())
}

/// JSON output is surfaced unmodified; scalar output becomes a JSON string.
fn parse_output(stdout: &str) -> Value {
    match serde_json::from_str::<Value>(stdout) {
        Ok(value) => value,
        Err(_) => {
            if stdout.contains('\n') {
                warn!("node output is neither JSON nor a scalar; passing through raw");
            }
            json!(stdout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_json_object() {
        let value = parse_output(r#"{"chain": "main", "blocks": 840000}"#);
        assert_eq!(value["chain"], "main");
    }

    #[test]
    fn test_parse_output_scalar_hash() {
        let value = parse_output("00000000000000000002c0cc73626b56fb3ee1ce605b0ce125cc4fb58775a0a9");
        assert_eq!(
            value,
            json!("00000000000000000002c0cc73626b56fb3ee1ce605b0ce125cc4fb58775a0a9")
        );
    }

    #[test]
    fn test_block_hash_requires_height() {
        let config = FileConfig::default();
        let call = ToolCall::new(GET_BLOCK_HASH);
        let result = execute_block_hash(&config, &call);
        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "INVALID_ARGUMENT");
    }

    #[test]
    fn test_block_rejects_out_of_range_verbosity() {
        let config = FileConfig::default();
        let call = ToolCall::new(GET_BLOCK)
            .with_arg("blockhash", "00".repeat(32))
            .with_arg("verbosity", 3);
        let result = execute_block(&config, &call);
        assert!(!result.is_success());
    }

    #[test]
    fn test_estimate_smart_fee_rejects_unknown_mode() {
        let config = FileConfig::default();
        let call = ToolCall::new(ESTIMATE_SMART_FEE)
            .with_arg("conf_target", 6)
            .with_arg("estimate_mode", "AGGRESSIVE");
        let result = execute_estimate_smart_fee(&config, &call);
        assert!(!result.is_success());
        assert!(
            result
                .error()
                .unwrap()
                .message
                .contains("CONSERVATIVE")
        );
    }

    #[test]
    fn test_estimate_smart_fee_rejects_zero_target() {
        let config = FileConfig::default();
        let call = ToolCall::new(ESTIMATE_SMART_FEE).with_arg("conf_target", 0);
        let result = execute_estimate_smart_fee(&config, &call);
        assert!(!result.is_success());
    }

    #[test]
    fn test_unreachable_node_maps_to_error_envelope() {
        let mut config = FileConfig::default();
        config.node.cli_path = "definitely-not-bitcoin-cli".to_string();
        let call = ToolCall::new(GET_BLOCKCHAIN_INFO);
        let result = execute_blockchain_info(&config, &call);
        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "UNREACHABLE_COLLABORATOR");
        assert!(result.error().unwrap().command.is_some());
    }
}
