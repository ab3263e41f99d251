// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
///
/// Capture failures never surface here; they are folded into
/// `InvocationResult::Error` at the invoker boundary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
