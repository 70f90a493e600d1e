//! Tool implementations
//!
//! The exposed operations fall into three groups:
//! - `node`: one-shot blockchain/network/fee queries over the node's RPC
//!   client binary
//! - `wallet`: balance, transaction history, send and inscribe over the ord
//!   wallet CLI, with two-phase confirmation for state-changing calls
//! - `image`: normalization of user-supplied images into the uploads
//!   directory and size-constrained recompression

pub mod image;
pub mod node;
pub mod wallet;

mod executor;

pub use executor::ToolExecutor;

use ordbridge_domain::ToolSpec;

/// Create the tool specification with all exposed tools
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(node::blockchain_info_definition())
        .register(node::network_info_definition())
        .register(node::block_hash_definition())
        .register(node::block_definition())
        .register(node::estimate_smart_fee_definition())
        .register(wallet::balance::definition())
        .register(wallet::transactions::definition())
        .register(wallet::send::definition())
        .register(wallet::inscribe::definition())
        .register(image::save_image_definition())
        .register(image::compress_image_definition())
}
