//! Infrastructure layer for ordbridge
//!
//! This crate contains the adapters behind the tool façade: configuration
//! loading, payload classification and staging, external process invocation,
//! output interpretation, and the concrete tool implementations.

pub mod config;
pub mod interpret;
pub mod payload;
pub mod process;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileNodeConfig, FileStagingConfig,
    FileUploadsConfig, FileWalletConfig,
};
pub use interpret::{BalanceReading, EntrySplit, OutputInterpreter, interpreter_for_version};
pub use payload::{StageError, Staged, Stager, classify};
pub use process::{ExecutionResult, InvokeError, invoke};
pub use tools::{ToolExecutor, default_tool_spec};
