//! Tool domain value objects — immutable result and error types
//!
//! Every tool execution produces exactly one [`ToolResult`]. Successful
//! results carry a JSON body that is returned to the caller verbatim; failed
//! results carry a [`ToolError`] which renders as an `{"error": ...}`
//! envelope, with the external command line echoed when one was involved.
//! Nothing is ever raised past the tool boundary.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Error that occurred during tool execution.
///
/// The `code` names the failure class; validation failures are reported
/// before any external process is started.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "INVALID_NETWORK", "EXTERNAL_PROCESS_FAILURE")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Echo of the external command line, for diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            command: None,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    // Validation errors

    pub fn invalid_network(name: impl std::fmt::Display) -> Self {
        Self::new(
            "INVALID_NETWORK",
            format!(
                "Invalid network '{}'. Must be one of: mainnet, testnet, signet",
                name
            ),
        )
    }

    pub fn invalid_fee_rate() -> Self {
        Self::new(
            "INVALID_FEE_RATE",
            "Invalid fee rate. Must be a positive integer.",
        )
    }

    pub fn invalid_amount() -> Self {
        Self::new(
            "INVALID_AMOUNT",
            "Invalid amount. Must be a positive integer in satoshis.",
        )
    }

    pub fn amount_exceeds_limit(limit_sats: u64) -> Self {
        Self::new(
            "AMOUNT_EXCEEDS_LIMIT",
            format!(
                "Amount exceeds safety limit of {} sats. For security, this tool is limited to smaller transactions.",
                limit_sats
            ),
        )
    }

    pub fn invalid_address() -> Self {
        Self::new(
            "INVALID_ADDRESS",
            "Invalid address. Must provide a non-empty Bitcoin address.",
        )
    }

    pub fn invalid_limit() -> Self {
        Self::new("INVALID_LIMIT", "Invalid limit. Must be a positive integer.")
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            "NOT_FOUND",
            format!("Resource not found: {}", resource.into()),
        )
    }

    // Staging errors

    pub fn fetch_error(message: impl Into<String>) -> Self {
        Self::new("FETCH_ERROR", message)
    }

    pub fn decode_error(message: impl Into<String>) -> Self {
        Self::new("DECODE_ERROR", message)
    }

    pub fn invalid_image(message: impl Into<String>) -> Self {
        Self::new("INVALID_IMAGE", message)
    }

    // Invocation errors

    pub fn process_failure(message: impl Into<String>) -> Self {
        Self::new("EXTERNAL_PROCESS_FAILURE", message)
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::new("UNREACHABLE_COLLABORATOR", message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new("TIMEOUT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    /// Render as the error envelope returned to the caller.
    pub fn to_envelope(&self) -> Value {
        let mut envelope = json!({
            "error": self.message,
            "code": self.code,
        });
        if let Some(command) = &self.command {
            envelope["command"] = Value::String(command.clone());
        }
        envelope
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(command) = &self.command {
            write!(f, " (command: {})", command)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Structured metadata about tool execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// For staged or written files: the affected path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Result of a tool execution, carrying the response body or error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the execution was successful
    pub success: bool,
    /// Response body (for successful execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Metadata about the execution
    #[serde(default)]
    pub metadata: ToolResultMetadata,
}

impl ToolResult {
    /// Create a successful result with a JSON response body
    pub fn success(tool_name: impl Into<String>, output: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: Some(output),
            error: None,
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
            metadata: ToolResultMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: ToolResultMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.metadata.duration_ms = Some(duration_ms);
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn output(&self) -> Option<&Value> {
        self.output.as_ref()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// The single JSON envelope returned to the caller: the response body on
    /// success, `{"error": ..., "command": ...?}` on failure.
    pub fn envelope(&self) -> Value {
        match (&self.output, &self.error) {
            (Some(output), _) => output.clone(),
            (None, Some(error)) => error.to_envelope(),
            (None, None) => json!({}),
        }
    }

    /// Envelope rendered as a single line, for the request/response loop.
    pub fn render_compact(&self) -> String {
        serde_json::to_string(&self.envelope()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Envelope rendered indented, for one-shot CLI output.
    pub fn render_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.envelope()).unwrap_or_else(|_| "{}".to_string())
    }
}
