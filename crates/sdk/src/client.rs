//! Fingerprint Bridge Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{CaptureResponse, HealthResponse};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use std::time::Duration;

/// Capture runs for up to 30s on the daemon side; leave headroom for process teardown
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

/// Fingerprint Bridge Client
///
/// # Example
///
/// ```no_run
/// use fingerprint_sdk::FingerprintClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = FingerprintClient::connect("http://127.0.0.1:9530").await?;
/// # Ok(())
/// # }
/// ```
pub struct FingerprintClient {
    client: HttpClient,
}

impl FingerprintClient {
    /// Connect to the daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9530`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        Self::connect_with_timeout(url, DEFAULT_REQUEST_TIMEOUT).await
    }

    /// Connect with a custom request timeout
    ///
    /// Should exceed the daemon's capture timeout, or long captures will be
    /// cut off client-side.
    pub async fn connect_with_timeout(url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(timeout)
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Run one fingerprint capture
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use fingerprint_sdk::FingerprintClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = FingerprintClient::connect("http://127.0.0.1:9530").await?;
    /// let response = client.capture().await?;
    /// println!("status: {:?}", response.status());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn capture(&self) -> Result<CaptureResponse> {
        let response: CaptureResponse = self
            .client
            .request("fingerprint.capture.v1", rpc_params![])
            .await?;

        Ok(response)
    }

    /// Check that the daemon is up
    pub async fn health(&self) -> Result<HealthResponse> {
        let response: HealthResponse = self
            .client
            .request("system.health.v1", rpc_params![])
            .await?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_invalid_url() {
        let result = FingerprintClient::connect("not a url").await;
        assert!(matches!(result, Err(SdkError::Connection(_))));
    }

    #[tokio::test]
    async fn test_capture_without_daemon_is_transport_error() {
        // Port 1 is reserved; nothing listens there
        let client = FingerprintClient::connect_with_timeout("http://127.0.0.1:1", Duration::from_secs(2))
            .await
            .unwrap();

        let result = client.capture().await;

        assert!(matches!(result, Err(SdkError::Transport(_))));
    }
}
