//! Payload classification and staging
//!
//! An opaque input string is classified into an
//! [`ordbridge_domain::InputPayload`] (file, URL, data URI, or literal text)
//! and then staged into a local file that the wallet tool can read. Staged
//! files live in a per-invocation temporary directory that is removed on
//! every exit path.

mod classifier;
mod staging;

pub use classifier::classify;
pub use staging::{StageError, Staged, Stager, extension_for_mime};
