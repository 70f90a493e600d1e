//! Domain layer for ordbridge
//!
//! This crate contains the core types shared by every tool exposed by the
//! server: Bitcoin network selection, inscription payload classification,
//! external command assembly, and the tool call/result envelope types.
//! It performs no I/O and has no dependencies on infrastructure concerns.
//!
//! # Core Concepts
//!
//! ## Tool envelope
//!
//! Every exposed operation consumes a [`ToolCall`] and produces exactly one
//! [`ToolResult`]. Failures never cross the tool boundary as panics or raw
//! errors; they are encoded as an error envelope with an `error` message and,
//! for external command failures, a `command` echo for diagnostics.
//!
//! ## Two-phase confirmation
//!
//! State-changing wallet operations (send, inscribe) are high risk: unless a
//! caller passes `confirm=true`, the façade forces a dry run and answers with
//! a fee estimate and a confirmation prompt.

pub mod command;
pub mod network;
pub mod payload;
pub mod tool;

// Re-export commonly used types
pub use command::CommandSpec;
pub use network::{InvalidNetwork, Network};
pub use payload::InputPayload;
pub use tool::{
    entities::{RiskLevel, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
