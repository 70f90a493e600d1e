//! End-to-end tool flow against a stub wallet binary.
//!
//! A shell script stands in for the ord executable so the full path is
//! exercised: routing, validation, command assembly, subprocess capture and
//! output interpretation.

#![cfg(unix)]

use ordbridge_domain::ToolCall;
use ordbridge_infrastructure::{FileConfig, ToolExecutor};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TXID: &str = "c0ffee1234567890c0ffee1234567890c0ffee1234567890c0ffee1234567890";

fn stub_script() -> String {
    format!(
        r#"#!/bin/sh
case "$*" in
  *"wallet balance"*)
    echo "args: $*"
    echo "cardinal: 123456 sat"
    echo "ordinal: 1000 sat"
    ;;
  *"wallet send"*"--dry-run"*)
    echo "estimated fee: 210 sat"
    ;;
  *"wallet send"*)
    echo "txid: {txid}"
    ;;
  *"wallet inscribe"*"--dry-run"*)
    echo "estimated cost: 5000 sat"
    ;;
  *"wallet inscribe"*)
    echo "inscription: {txid}i0"
    echo "txid: {txid}"
    ;;
  *"wallet transactions"*)
    echo '[{{"txid": "aa"}}, {{"txid": "bb"}}, {{"txid": "cc"}}]'
    ;;
  *)
    echo "unknown subcommand: $*" >&2
    exit 1
    ;;
esac
"#,
        txid = TXID
    )
}

fn write_stub(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("ord");
    fs::write(&path, contents).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn executor_with(ord_path: &Path) -> ToolExecutor {
    let mut config = FileConfig::default();
    config.wallet.ord_path = ord_path.display().to_string();
    ToolExecutor::new(config).unwrap()
}

#[tokio::test]
async fn balance_flows_through_stub() {
    let dir = TempDir::new().unwrap();
    let executor = executor_with(&write_stub(&dir, &stub_script()));

    let result = executor.execute(&ToolCall::new("wallet_balance")).await;
    assert!(result.is_success(), "{:?}", result.error());

    let body = result.output().unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["network"], "mainnet");
    assert_eq!(body["parsed"]["cardinal_balance_sats"], 123456.0);
    assert_eq!(body["parsed"]["ordinal_balance_sats"], 1000.0);
    assert!(body["raw_output"].as_str().unwrap().contains("cardinal"));
    assert!(result.metadata.duration_ms.is_some());
}

#[tokio::test]
async fn network_flag_reaches_the_command_line() {
    let dir = TempDir::new().unwrap();
    let executor = executor_with(&write_stub(&dir, &stub_script()));

    let call = ToolCall::new("wallet_balance").with_arg("network", "testnet");
    let result = executor.execute(&call).await;
    assert!(result.is_success());

    let raw = result.output().unwrap()["raw_output"].as_str().unwrap().to_string();
    assert!(raw.contains("--testnet wallet balance"), "raw: {}", raw);
}

#[tokio::test]
async fn send_requires_confirmation_then_broadcasts() {
    let dir = TempDir::new().unwrap();
    let executor = executor_with(&write_stub(&dir, &stub_script()));

    let call = ToolCall::new("wallet_send")
        .with_arg("address", "bc1qintegration")
        .with_arg("amount_sats", 50_000);
    let result = executor.execute(&call).await;
    assert!(result.is_success(), "{:?}", result.error());

    let body = result.output().unwrap();
    assert_eq!(body["confirmation_required"], true);
    assert!(body["fee_estimate"].as_str().unwrap().contains("210"));
    assert!(body.get("txid").is_none());

    let confirmed = executor.execute(&call.clone().with_arg("confirm", true)).await;
    assert!(confirmed.is_success());
    let body = confirmed.output().unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["dry_run"], false);
    assert_eq!(body["txid"], TXID);
}

#[tokio::test]
async fn inscribe_literal_text_two_phase() {
    let dir = TempDir::new().unwrap();
    let executor = executor_with(&write_stub(&dir, &stub_script()));

    let call = ToolCall::new("wallet_inscribe").with_arg("data", "hello ordinals");
    let result = executor.execute(&call).await;
    assert!(result.is_success(), "{:?}", result.error());

    let body = result.output().unwrap();
    assert_eq!(body["confirmation_required"], true);
    assert!(body["fee_estimate"].as_str().unwrap().contains("5000"));
    assert_eq!(body["dry_run_result"]["dry_run"], true);

    let confirmed = executor.execute(&call.clone().with_arg("confirm", true)).await;
    assert!(confirmed.is_success());
    let body = confirmed.output().unwrap();
    assert_eq!(body["inscription_id"], format!("{}i0", TXID));
    assert_eq!(body["txid"], TXID);
}

#[tokio::test]
async fn transactions_truncated_to_limit() {
    let dir = TempDir::new().unwrap();
    let executor = executor_with(&write_stub(&dir, &stub_script()));

    let call = ToolCall::new("wallet_transactions").with_arg("limit", 2);
    let result = executor.execute(&call).await;
    assert!(result.is_success(), "{:?}", result.error());

    let body = result.output().unwrap();
    assert_eq!(body["count"], 2);
    assert_eq!(body["transactions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn failing_command_surfaces_stderr_and_command_line() {
    let dir = TempDir::new().unwrap();
    let stub = write_stub(&dir, "#!/bin/sh\necho 'error: wallet not loaded' >&2\nexit 1\n");
    let executor = executor_with(&stub);

    let result = executor.execute(&ToolCall::new("wallet_balance")).await;
    assert!(!result.is_success());

    let error = result.error().unwrap();
    assert_eq!(error.code, "EXTERNAL_PROCESS_FAILURE");
    assert!(error.message.contains("wallet not loaded"));
    assert!(error.command.as_deref().unwrap().ends_with("wallet balance"));
}

#[tokio::test]
async fn hung_command_times_out() {
    let dir = TempDir::new().unwrap();
    let stub = write_stub(&dir, "#!/bin/sh\nsleep 30\n");

    let mut config = FileConfig::default();
    config.wallet.ord_path = stub.display().to_string();
    config.wallet.timeout_seconds = 1;
    let executor = ToolExecutor::new(config).unwrap();

    let result = executor.execute(&ToolCall::new("wallet_balance")).await;
    assert!(!result.is_success());
    assert_eq!(result.error().unwrap().code, "TIMEOUT");
}
