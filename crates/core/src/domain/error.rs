// Capture Error Types

use crate::domain::invocation::{InvocationResult, FAILURE_MESSAGE_PREFIX};
use thiserror::Error;

/// Fixed message for an invocation that produced no usable stdout
pub const NO_OUTPUT_MESSAGE: &str = "No output from Python script";

/// Every way a single capture invocation can fail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Failed to launch '{program}': {reason}")]
    Launch { program: String, reason: String },

    #[error("Process timed out after {0}ms")]
    Timeout(u64),

    #[error("I/O error while reading process output: {0}")]
    Io(String),

    #[error("Process output exceeded {0} bytes")]
    OutputTooLarge(usize),

    #[error("Command {}: {stderr}", exit_label(.code))]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("{}", NO_OUTPUT_MESSAGE)]
    EmptyOutput,

    #[error("{0}")]
    Parse(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl CaptureError {
    /// Fold the failure into the uniform error result returned to callers
    pub fn into_result(self) -> InvocationResult {
        match self {
            CaptureError::EmptyOutput => InvocationResult::error(NO_OUTPUT_MESSAGE),
            other => InvocationResult::error(format!("{}{}", FAILURE_MESSAGE_PREFIX, other)),
        }
    }
}

impl From<serde_json::Error> for CaptureError {
    fn from(err: serde_json::Error) -> Self {
        CaptureError::Parse(err.to_string())
    }
}
