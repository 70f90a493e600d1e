//! Configuration loading
//!
//! Settings are resolved once at process start and threaded into the tool
//! executor; tools never consult the environment at call time.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileNodeConfig, FileStagingConfig, FileUploadsConfig,
    FileWalletConfig,
};
pub use loader::ConfigLoader;
