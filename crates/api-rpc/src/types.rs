//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.

use serde::{Deserialize, Serialize};

/// fingerprint.capture.v1 - Run one capture
///
/// The result is the capture script's document, or
/// `{"status": "error", "message": ...}`.
#[derive(Debug, Default, Deserialize)]
pub struct CaptureRequest {
    // No parameters needed
}

/// system.health.v1 - Liveness probe
#[derive(Debug, Default, Deserialize)]
pub struct HealthRequest {
    // No parameters needed
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: i64,
    pub command: String,
    pub timeout_ms: u64,
}
