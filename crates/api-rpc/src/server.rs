//! JSON-RPC Server
//!
//! Implements the JSON-RPC 2.0 server over HTTP on localhost.

use crate::handler::RpcHandler;
use crate::types::{CaptureRequest, HealthRequest};
use fingerprint_core::application::FingerprintCapture;
use jsonrpsee::server::Server;
use jsonrpsee::RpcModule;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub use jsonrpsee::server::ServerHandle;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9530;

pub const METHOD_CAPTURE: &str = "fingerprint.capture.v1";
pub const METHOD_HEALTH: &str = "system.health.v1";

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, capture: Arc<FingerprintCapture>) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(capture)),
        }
    }

    /// Build the method table
    pub fn module(&self) -> Result<RpcModule<()>, String> {
        let mut module = RpcModule::new(());

        let handler = self.handler.clone();
        module
            .register_async_method(METHOD_CAPTURE, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: Option<CaptureRequest> = params.parse()?;
                    handler.capture(req.unwrap_or_default()).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method(METHOD_HEALTH, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: Option<HealthRequest> = params.parse()?;
                    handler.health(req.unwrap_or_default()).await
                }
            })
            .map_err(|e| e.to_string())?;

        Ok(module)
    }

    /// Start the JSON-RPC server
    ///
    /// Returns the bound address (useful with port 0) and the stop handle.
    pub async fn start(self) -> Result<(SocketAddr, ServerHandle), String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        let module = self.module()?;

        info!(addr = %local_addr, "JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok((local_addr, handle))
    }
}
