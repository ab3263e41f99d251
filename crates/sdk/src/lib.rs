//! Fingerprint Bridge SDK - Rust Client Library
//!
//! Provides a convenient client for the Fingerprint Bridge daemon.
//!
//! # Example
//!
//! ```no_run
//! use fingerprint_sdk::FingerprintClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect to daemon
//!     let client = FingerprintClient::connect("http://127.0.0.1:9530").await?;
//!
//!     // Run one capture
//!     let response = client.capture().await?;
//!
//!     if response.is_error() {
//!         eprintln!("Capture failed: {}", response.message().unwrap_or_default());
//!     } else if let Some(image) = response.image() {
//!         println!("Captured {} bytes of base64 PNG", image.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::FingerprintClient;
pub use error::{Result, SdkError};
pub use types::{CaptureResponse, HealthResponse};
