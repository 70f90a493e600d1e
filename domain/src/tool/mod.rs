//! Tool domain types
//!
//! Entities describe what tools exist and how they are called; value objects
//! carry the outcome of an execution back to the protocol boundary.

pub mod entities;
pub mod traits;
pub mod value_objects;
