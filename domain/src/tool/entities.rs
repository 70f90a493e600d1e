//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Risk level of a tool operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low risk - read-only queries (balance, blockchain info, fee estimates)
    Low,
    /// High risk - operations that spend funds or write files (send, inscribe)
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Definition of an exposed tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "wallet_balance")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Risk level of this tool
    pub risk_level: RiskLevel,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint (e.g., "string", "number", "boolean")
    pub param_type: String,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            risk_level,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn is_high_risk(&self) -> bool {
        matches!(self.risk_level, RiskLevel::High)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// Registry of the tools exposed at the protocol boundary
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: HashMap<String, ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn high_risk_tools(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values().filter(|t| t.is_high_risk())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A call to a tool with named arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }

    /// Get an optional u64 argument
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.arguments.get(key).and_then(|v| v.as_u64())
    }

    /// Get an optional bool argument
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.arguments.get(key).and_then(|v| v.as_bool())
    }

    /// Whether the argument is present with a non-null value
    pub fn has_arg(&self, key: &str) -> bool {
        matches!(self.arguments.get(key), Some(v) if !v.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new("wallet_send", "Send bitcoin", RiskLevel::High)
            .with_parameter(ToolParameter::new("address", "Destination address", true))
            .with_parameter(
                ToolParameter::new("amount_sats", "Amount in satoshis", true).with_type("number"),
            );

        assert_eq!(tool.name, "wallet_send");
        assert!(tool.is_high_risk());
        assert_eq!(tool.parameters.len(), 2);
        assert_eq!(tool.parameters[1].param_type, "number");
    }

    #[test]
    fn test_tool_spec() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new(
                "wallet_balance",
                "Balance",
                RiskLevel::Low,
            ))
            .register(ToolDefinition::new("wallet_send", "Send", RiskLevel::High));

        assert!(spec.get("wallet_balance").is_some());
        assert!(spec.get("unknown").is_none());
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.high_risk_tools().count(), 1);
    }

    #[test]
    fn test_tool_call_accessors() {
        let call = ToolCall::new("wallet_send")
            .with_arg("address", "bc1qexample")
            .with_arg("amount_sats", 50000)
            .with_arg("confirm", true);

        assert_eq!(call.get_string("address"), Some("bc1qexample"));
        assert_eq!(call.get_u64("amount_sats"), Some(50000));
        assert_eq!(call.get_bool("confirm"), Some(true));
        assert!(call.require_string("missing").is_err());
        assert!(call.has_arg("address"));
        assert!(!call.has_arg("fee_rate"));
    }

    #[test]
    fn test_tool_call_null_argument_is_absent() {
        let call = ToolCall::new("wallet_transactions").with_arg("limit", serde_json::Value::Null);
        assert!(!call.has_arg("limit"));
        assert_eq!(call.get_u64("limit"), None);
    }

    #[test]
    fn test_tool_call_deserializes_without_arguments() {
        let call: ToolCall = serde_json::from_str(r#"{"tool_name": "wallet_balance"}"#).unwrap();
        assert_eq!(call.tool_name, "wallet_balance");
        assert!(call.arguments.is_empty());
    }
}
