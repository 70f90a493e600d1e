//! Tool domain traits
//!
//! Pure validation logic for tool calls, applied before any argument is
//! interpreted by a tool implementation.

use super::entities::{ToolCall, ToolDefinition};

/// Validator for tool calls
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation: checks required and unknown parameters.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        let valid_params: std::collections::HashSet<&str> = definition
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();

        for arg_name in call.arguments.keys() {
            if !valid_params.contains(arg_name.as_str()) {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{RiskLevel, ToolParameter};

    #[test]
    fn test_validator_missing_required() {
        let validator = DefaultToolValidator;
        let definition = ToolDefinition::new("wallet_send", "Send bitcoin", RiskLevel::High)
            .with_parameter(ToolParameter::new("address", "Destination", true));

        let call = ToolCall::new("wallet_send");
        let result = validator.validate(&call, &definition);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Missing required parameter"));
    }

    #[test]
    fn test_validator_unknown_param() {
        let validator = DefaultToolValidator;
        let definition = ToolDefinition::new("wallet_balance", "Balance", RiskLevel::Low)
            .with_parameter(ToolParameter::new("network", "Network override", false));

        let call = ToolCall::new("wallet_balance").with_arg("chain", "testnet");
        let result = validator.validate(&call, &definition);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unknown parameter"));
    }

    #[test]
    fn test_validator_valid_call() {
        let validator = DefaultToolValidator;
        let definition = ToolDefinition::new("wallet_send", "Send bitcoin", RiskLevel::High)
            .with_parameter(ToolParameter::new("address", "Destination", true))
            .with_parameter(ToolParameter::new("amount_sats", "Amount", true));

        let call = ToolCall::new("wallet_send")
            .with_arg("address", "bc1qexample")
            .with_arg("amount_sats", 1000);

        assert!(validator.validate(&call, &definition).is_ok());
    }
}
