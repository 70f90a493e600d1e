//! Tool routing
//!
//! The executor owns the shared collaborators (config, HTTP client, output
//! interpreter) and routes validated calls to the tool implementations.
//! Every call, known or not, comes back as a [`ToolResult`]; nothing is
//! raised past this boundary.

use crate::config::FileConfig;
use crate::interpret::{OutputInterpreter, interpreter_for_version};
use crate::payload::Stager;
use crate::tools::{self, image, node, wallet};
use ordbridge_domain::{
    DefaultToolValidator, ToolCall, ToolError, ToolResult, ToolSpec, ToolValidator,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

pub struct ToolExecutor {
    config: FileConfig,
    spec: ToolSpec,
    validator: DefaultToolValidator,
    interpreter: Arc<dyn OutputInterpreter>,
    stager: Stager,
}

impl ToolExecutor {
    /// Build an executor over validated configuration. Fails only if the
    /// HTTP client cannot be constructed.
    pub fn new(config: FileConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.staging.fetch_timeout_seconds))
            .build()?;
        let stager = Stager::new(client, &config.staging.user_agent);
        Ok(Self {
            spec: tools::default_tool_spec(),
            validator: DefaultToolValidator,
            interpreter: interpreter_for_version(None),
            stager,
            config,
        })
    }

    pub fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    pub fn config(&self) -> &FileConfig {
        &self.config
    }

    /// Execute a tool call, returning exactly one result.
    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        let started = Instant::now();
        debug!(tool = %call.tool_name, "executing tool call");

        let Some(definition) = self.spec.get(&call.tool_name) else {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::not_found(format!("tool '{}'", call.tool_name)),
            );
        };

        if let Err(message) = self.validator.validate(call, definition) {
            return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(message));
        }

        let result = self.dispatch(call).await;
        result.with_duration(started.elapsed().as_millis() as u64)
    }

    async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        let config = &self.config;
        let interpreter = self.interpreter.as_ref();
        match call.tool_name.as_str() {
            node::GET_BLOCKCHAIN_INFO => node::execute_blockchain_info(config, call),
            node::GET_NETWORK_INFO => node::execute_network_info(config, call),
            node::GET_BLOCK_HASH => node::execute_block_hash(config, call),
            node::GET_BLOCK => node::execute_block(config, call),
            node::ESTIMATE_SMART_FEE => node::execute_estimate_smart_fee(config, call),
            wallet::balance::WALLET_BALANCE => wallet::balance::execute(config, interpreter, call),
            wallet::transactions::WALLET_TRANSACTIONS => {
                wallet::transactions::execute(config, interpreter, call)
            }
            wallet::send::WALLET_SEND => wallet::send::execute(config, interpreter, call),
            wallet::inscribe::WALLET_INSCRIBE => {
                wallet::inscribe::execute(config, interpreter, &self.stager, call).await
            }
            image::SAVE_IMAGE => image::execute_save_image(config, &self.stager, call).await,
            image::COMPRESS_IMAGE => image::execute_compress_image(call),
            // Registered but not routed is a wiring bug, not a caller error
            other => ToolResult::failure(
                other,
                ToolError::execution_failed(format!("tool '{}' is not routed", other)),
            ),
        }
    }
}
