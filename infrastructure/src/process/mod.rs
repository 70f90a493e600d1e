//! External process invocation

mod invoker;

pub use invoker::{ExecutionResult, InvokeError, invoke};
