//! CLI entrypoint for ordbridge
//!
//! Wires configuration, logging and the tool executor together, then either
//! serves the line-delimited JSON request loop on stdio or runs a single
//! tool call from the command line.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ordbridge_domain::ToolCall;
use ordbridge_infrastructure::tools::node;
use ordbridge_infrastructure::tools::wallet;
use ordbridge_infrastructure::{ConfigLoader, FileConfig, ToolExecutor};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ordbridge", version, about = "Bitcoin node and ord wallet tool server")]
struct Cli {
    /// Increase log verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a config file (merged over discovered config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ignore all config files and use built-in defaults
    #[arg(long, global = true)]
    no_config: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve tool calls as line-delimited JSON over stdin/stdout
    Serve,
    /// Execute a single tool call and print the result
    Call {
        /// Name of the tool (see `ordbridge tools`)
        tool: String,
        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// List the exposed tools and their parameters
    Tools,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // The stdout channel carries responses; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    config.validate().context("invalid configuration")?;

    let executor = ToolExecutor::new(config).context("failed to build tool executor")?;

    match cli.command {
        Command::Serve => serve(&executor).await,
        Command::Call { tool, args } => call_once(&executor, &tool, &args).await,
        Command::Tools => {
            list_tools(&executor);
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")
}

/// Log collaborator availability. Missing binaries are a warning, not a
/// startup failure: queries against the other collaborator still work.
fn probe_collaborators(executor: &ToolExecutor) {
    let config = executor.config();

    if !wallet::wallet_cli_available(config) {
        warn!(path = %config.wallet.ord_path, "ord binary not found; wallet tools will fail");
    }
    if !node::node_cli_available(config) {
        warn!(path = %config.node.cli_path, "bitcoin-cli binary not found; node tools will fail");
        return;
    }

    match node::connection_info(config) {
        Ok(info) => {
            let chain = info["chain"].as_str().unwrap_or("unknown");
            let blocks = info["blocks"].as_u64().unwrap_or(0);
            info!(chain, blocks, "connected to node");
        }
        Err(e) => warn!("node probe failed: {}", e),
    }
}

async fn serve(executor: &ToolExecutor) -> Result<()> {
    info!(tools = executor.spec().len(), "serving tool calls on stdio");
    probe_collaborators(executor);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<ToolCall>(line) {
            Ok(call) => executor.execute(&call).await.render_compact(),
            Err(e) => serde_json::json!({
                "error": format!("Malformed tool call: {}", e),
                "code": "INVALID_ARGUMENT",
            })
            .to_string(),
        };
        println!("{}", response);
    }

    info!("stdin closed, shutting down");
    Ok(())
}

async fn call_once(executor: &ToolExecutor, tool: &str, args: &str) -> Result<()> {
    let arguments = serde_json::from_str(args).context("--args must be a JSON object")?;
    let serde_json::Value::Object(map) = arguments else {
        bail!("--args must be a JSON object");
    };

    let mut call = ToolCall::new(tool);
    call.arguments = map.into_iter().collect();

    let result = executor.execute(&call).await;
    println!("{}", result.render_pretty());

    if !result.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn list_tools(executor: &ToolExecutor) {
    let mut tools: Vec<_> = executor.spec().all().collect();
    tools.sort_by(|a, b| a.name.cmp(&b.name));

    for tool in tools {
        println!("{} [{}]", tool.name, tool.risk_level);
        println!("  {}", tool.description);
        for param in &tool.parameters {
            let required = if param.required { "required" } else { "optional" };
            println!(
                "  --{} <{}> ({}) {}",
                param.name, param.param_type, required, param.description
            );
        }
        println!();
    }
}
