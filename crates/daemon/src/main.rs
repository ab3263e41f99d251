//! Fingerprint Bridge - Main Entry Point
//! JSON-RPC server in front of the fingerprint capture script

mod config;
mod telemetry;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use config::DaemonConfig;
use fingerprint_api_rpc::RpcServer;
use fingerprint_core::application::FingerprintCapture;
use fingerprint_core::port::id_provider::UuidProvider;
use fingerprint_core::port::time_provider::SystemTimeProvider;
use fingerprint_infra_system::SubprocessRunner;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DaemonConfig::from_env()?;

    // 2. Initialize logging
    let _log_guard = telemetry::init_logging(config.log_format, config.log_dir.as_deref())?;

    info!("Fingerprint Bridge v{} starting...", VERSION);

    if telemetry::otel_requested() && cfg!(not(feature = "telemetry")) {
        tracing::warn!("OpenTelemetry endpoint set but feature 'telemetry' not enabled");
        tracing::warn!("Rebuild with: cargo build --features telemetry");
    }

    info!(
        command = %config.capture.command_line,
        working_dir = %config.capture.working_dir.display(),
        timeout_ms = config.capture.timeout_ms,
        max_output_bytes = config.capture.max_output_bytes,
        "Capture configuration loaded"
    );

    // 3. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let runner = Arc::new(SubprocessRunner::new(time_provider));
    let capture = Arc::new(FingerprintCapture::new(
        runner,
        Arc::new(UuidProvider),
        config.capture.clone(),
    ));

    // 4. Start JSON-RPC server
    info!("Starting JSON-RPC server...");
    let rpc_server = RpcServer::new(config.rpc.clone(), capture);
    let (addr, rpc_handle) = rpc_server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(addr = %addr, "System ready. Waiting for capture requests...");
    info!("Press Ctrl+C to shutdown");

    // 5. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 6. Graceful shutdown
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;

    info!("Shutdown complete.");

    Ok(())
}
