//! SDK Response Types
//!
//! Mirrors the JSON-RPC results from the api-rpc crate.

use serde::{Deserialize, Serialize};

/// Result of `fingerprint.capture.v1`
///
/// Holds the capture script's document verbatim. The script reports
/// `{"status": "success", "message": ..., "image": <base64 PNG>}` on a good
/// read; the daemon reports `{"status": "error", "message": ...}` when the
/// invocation itself fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaptureResponse(pub serde_json::Value);

impl CaptureResponse {
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(|v| v.as_str())
    }

    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(|v| v.as_str())
    }

    /// Base64-encoded PNG of the fingerprint, when present
    pub fn image(&self) -> Option<&str> {
        self.0.get("image").and_then(|v| v.as_str())
    }

    pub fn is_error(&self) -> bool {
        self.status() == Some("error")
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

/// Result of `system.health.v1`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: i64,
    pub command: String,
    pub timeout_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_accessors() {
        let response: CaptureResponse = serde_json::from_value(json!({
            "status": "success",
            "message": "Fingerprint captured successfully",
            "image": "iVBORw0KGgo="
        }))
        .unwrap();

        assert!(!response.is_error());
        assert_eq!(response.image(), Some("iVBORw0KGgo="));
    }

    #[test]
    fn test_error_accessors() {
        let response = CaptureResponse(json!({
            "status": "error",
            "message": "No output from Python script"
        }));

        assert!(response.is_error());
        assert_eq!(response.message(), Some("No output from Python script"));
        assert_eq!(response.image(), None);
    }

    #[test]
    fn test_non_object_payload() {
        let response = CaptureResponse(json!([1, 2, 3]));
        assert_eq!(response.status(), None);
        assert!(!response.is_error());
    }
}
