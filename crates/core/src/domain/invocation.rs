// Invocation Result Domain Model

use serde::ser::{Serialize, Serializer};

/// Prefix for every wrapped capture failure message
pub const FAILURE_MESSAGE_PREFIX: &str = "Unable to capture fingerprint. Details: ";

/// Payload returned verbatim from the capture script
pub type Payload = serde_json::Value;

/// Outcome status of one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStatus {
    Ok,
    Error,
}

impl InvocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationStatus::Ok => "ok",
            InvocationStatus::Error => "error",
        }
    }
}

/// Result of one capture invocation
///
/// `Ok` carries the script's document unchanged. `Error` never carries a
/// payload: failure is total.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationResult {
    Ok(Payload),
    Error { message: String },
}

impl InvocationResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn status(&self) -> InvocationStatus {
        match self {
            InvocationResult::Ok(_) => InvocationStatus::Ok,
            InvocationResult::Error { .. } => InvocationStatus::Error,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, InvocationResult::Ok(_))
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            InvocationResult::Ok(payload) => Some(payload),
            InvocationResult::Error { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            InvocationResult::Ok(_) => None,
            InvocationResult::Error { message } => Some(message),
        }
    }
}

#[derive(serde::Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    message: &'a str,
}

impl Serialize for InvocationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InvocationResult::Ok(payload) => payload.serialize(serializer),
            InvocationResult::Error { message } => ErrorBody {
                status: InvocationStatus::Error.as_str(),
                message,
            }
            .serialize(serializer),
        }
    }
}
