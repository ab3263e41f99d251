// Domain Layer - Pure capture types

pub mod error;
pub mod invocation;
pub mod raw_output;

// Re-exports
pub use error::{CaptureError, NO_OUTPUT_MESSAGE};
pub use invocation::{InvocationResult, InvocationStatus, Payload, FAILURE_MESSAGE_PREFIX};
pub use raw_output::RawOutput;
