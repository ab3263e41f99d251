//! RPC Method Handlers
//!
//! Implements the logic behind each JSON-RPC method.

use crate::error::to_rpc_error;
use crate::types::{CaptureRequest, HealthRequest, HealthResponse};
use fingerprint_core::application::FingerprintCapture;
use fingerprint_core::error::AppError;
use jsonrpsee::types::ErrorObjectOwned;
use std::sync::Arc;
use tracing::info;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    capture: Arc<FingerprintCapture>,
    start_time: std::time::Instant,
}

impl RpcHandler {
    pub fn new(capture: Arc<FingerprintCapture>) -> Self {
        Self {
            capture,
            start_time: std::time::Instant::now(),
        }
    }

    /// fingerprint.capture.v1
    ///
    /// Capture failures come back as a successful RPC result carrying
    /// `{"status": "error", ...}`.
    pub async fn capture(
        &self,
        _params: CaptureRequest,
    ) -> Result<serde_json::Value, ErrorObjectOwned> {
        info!("Capture requested");

        let result = self.capture.capture().await;

        serde_json::to_value(&result)
            .map_err(AppError::from)
            .map_err(to_rpc_error)
    }

    /// system.health.v1
    pub async fn health(&self, _params: HealthRequest) -> Result<HealthResponse, ErrorObjectOwned> {
        let config = self.capture.config();

        Ok(HealthResponse {
            status: "ok".to_string(),
            version: fingerprint_core::VERSION.to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs() as i64,
            command: config.command_line.to_string(),
            timeout_ms: config.timeout_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fingerprint_core::application::CaptureConfig;
    use fingerprint_core::port::id_provider::FixedIdProvider;
    use fingerprint_core::port::process_runner::mocks::MockProcessRunner;
    use serde_json::json;

    fn handler(runner: MockProcessRunner) -> RpcHandler {
        RpcHandler::new(Arc::new(FingerprintCapture::new(
            Arc::new(runner),
            Arc::new(FixedIdProvider("rpc-test".to_string())),
            CaptureConfig::default(),
        )))
    }

    #[tokio::test]
    async fn test_capture_forwards_payload() {
        let handler = handler(MockProcessRunner::new_stdout(
            r#"{"status":"success","message":"Fingerprint captured successfully","image":"aGk="}"#,
        ));

        let value = handler.capture(CaptureRequest::default()).await.unwrap();

        assert_eq!(
            value,
            json!({"status": "success", "message": "Fingerprint captured successfully", "image": "aGk="})
        );
    }

    #[tokio::test]
    async fn test_capture_failure_is_a_result_not_an_rpc_error() {
        let handler = handler(MockProcessRunner::new_stdout(""));

        let value = handler.capture(CaptureRequest::default()).await.unwrap();

        assert_eq!(
            value,
            json!({"status": "error", "message": "No output from Python script"})
        );
    }

    #[tokio::test]
    async fn test_health_reports_config() {
        let handler = handler(MockProcessRunner::new_stdout("{}"));

        let health = handler.health(HealthRequest::default()).await.unwrap();

        assert_eq!(health.status, "ok");
        assert_eq!(health.command, "python Scanner.py");
        assert_eq!(health.timeout_ms, 30_000);
    }
}
