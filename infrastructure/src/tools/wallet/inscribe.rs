//! Inscribing content onto satoshis, behind two-phase confirmation
//!
//! The `data` argument accepts a local file path, an http(s) URL, a data URI
//! or literal text; anything not already on disk is staged into a temporary
//! directory that is removed when the call returns, on every path. Without
//! `confirm: true` only a `--dry-run` inscribe runs, and its full output is
//! returned alongside the confirmation prompt.

use super::{resolve_fee_rate, resolve_network, run_wallet_command};
use crate::config::FileConfig;
use crate::interpret::OutputInterpreter;
use crate::payload::{Stager, classify};
use crate::tools::image::verify_image;
use ordbridge_domain::{
    CommandSpec, InputPayload, Network, RiskLevel, ToolCall, ToolDefinition, ToolError,
    ToolParameter, ToolResult,
};
use serde_json::json;
use std::path::Path;
use tracing::info;

pub const WALLET_INSCRIBE: &str = "wallet_inscribe";

const DEFAULT_FEE_RATE: u64 = 15;

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        WALLET_INSCRIBE,
        "Inscribe content onto a satoshi. Accepts a file path, URL, data URI or literal text. Without confirm=true this performs a dry run and returns the cost estimate for confirmation.",
        RiskLevel::High,
    )
    .with_parameter(ToolParameter::new(
        "data",
        "Content to inscribe: local file path, http(s) URL, data URI or literal text",
        true,
    ))
    .with_parameter(
        ToolParameter::new("fee_rate", "Fee rate in sat/vB (default: 15)", false)
            .with_type("number"),
    )
    .with_parameter(ToolParameter::new(
        "network",
        "Bitcoin network: mainnet, testnet or signet (default: configured network)",
        false,
    ))
    .with_parameter(
        ToolParameter::new(
            "is_image",
            "Set to true to require the content to be a decodable image",
            false,
        )
        .with_type("boolean"),
    )
    .with_parameter(
        ToolParameter::new(
            "confirm",
            "Set to true to broadcast the inscription after reviewing the cost estimate",
            false,
        )
        .with_type("boolean"),
    )
}

pub async fn execute(
    config: &FileConfig,
    interpreter: &dyn OutputInterpreter,
    stager: &Stager,
    call: &ToolCall,
) -> ToolResult {
    let data = match call.require_string("data") {
        Ok(d) => d,
        Err(e) => return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(e)),
    };

    let fee_rate = match resolve_fee_rate(call, DEFAULT_FEE_RATE) {
        Ok(r) => r,
        Err(e) => return ToolResult::failure(&call.tool_name, e),
    };

    let network = match resolve_network(call, config) {
        Ok(n) => n,
        Err(e) => return ToolResult::failure(&call.tool_name, e),
    };

    let is_image = call.get_bool("is_image").unwrap_or(false);
    let confirmed = call.get_bool("confirm").unwrap_or(false);

    let payload = classify(data);
    if is_image {
        // Local files can be checked before staging; everything else is
        // checked once the bytes are on disk.
        if let InputPayload::LocalFile(path) = &payload {
            if let Err(e) = verify_image(path) {
                return ToolResult::failure(&call.tool_name, e);
            }
        }
    }

    // Staged temp files live until this value drops at the end of the call.
    let staged = match stager.stage(payload, is_image.then_some("image")).await {
        Ok(s) => s,
        Err(e) => return ToolResult::failure(&call.tool_name, ToolError::from(e)),
    };

    if is_image && staged.is_temporary() {
        if let Err(e) = verify_image(staged.path()) {
            return ToolResult::failure(&call.tool_name, e);
        }
    }

    if !confirmed {
        // Phase one: forced dry run, never a broadcast.
        let dry = inscribe_staged(
            config,
            interpreter,
            &call.tool_name,
            staged.path(),
            fee_rate,
            network,
            true,
        );
        if !dry.is_success() {
            return dry;
        }
        let dry_body = dry.output().cloned().unwrap_or(json!(null));
        let fee_estimate = dry_body.get("output").cloned().unwrap_or(json!(null));
        return ToolResult::success(
            &call.tool_name,
            json!({
                "confirmation_required": true,
                "fee_estimate": fee_estimate,
                "dry_run_result": dry_body,
                "message": "This was a dry run. Review the cost estimate above and call again with confirm=true to broadcast the inscription.",
            }),
        );
    }

    inscribe_staged(
        config,
        interpreter,
        &call.tool_name,
        staged.path(),
        fee_rate,
        network,
        false,
    )
}

/// Run a single `ord wallet inscribe`, dry or real, against a staged file.
fn inscribe_staged(
    config: &FileConfig,
    interpreter: &dyn OutputInterpreter,
    tool_name: &str,
    file: &Path,
    fee_rate: u64,
    network: Network,
    dry_run: bool,
) -> ToolResult {
    let spec = CommandSpec::new(&config.wallet.ord_path)
        .network(network)
        .subcommand(["wallet", "inscribe"])
        .fee_rate(fee_rate)
        .dry_run(dry_run)
        .file(file);

    let stdout = match run_wallet_command(config, &spec) {
        Ok(out) => out,
        Err(e) => return ToolResult::failure(tool_name, e),
    };

    if dry_run {
        info!(file = %file.display(), %network, "dry-run inscribe completed");
    } else {
        info!(file = %file.display(), %network, "inscription broadcast");
    }

    let mut body = json!({
        "success": true,
        "network": network.as_str(),
        "output": stdout,
        "dry_run": dry_run,
    });
    if let Some(id) = interpreter.extract_inscription_id(&stdout) {
        body["inscription_id"] = json!(id);
    }
    if let Some(txid) = interpreter.extract_txid(&stdout) {
        body["txid"] = json!(txid);
    }
    ToolResult::success(tool_name, body)
}
