//! Simple SDK Example
//!
//! Demonstrates basic usage of the Fingerprint Bridge SDK.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package fingerprint-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --package fingerprint-sdk --example simple
//!    ```

use fingerprint_sdk::FingerprintClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Fingerprint Bridge SDK - Simple Example");
    println!("=======================================\n");

    // 1. Connect to daemon
    println!("1. Connecting to daemon...");
    let client = FingerprintClient::connect("http://127.0.0.1:9530").await?;
    let health = client.health().await?;
    println!("   ✓ Connected (v{}, command: {})\n", health.version, health.command);

    // 2. Capture
    println!("2. Place a finger on the scanner...");
    let response = client.capture().await?;

    if response.is_error() {
        println!("   ✗ {}", response.message().unwrap_or("unknown error"));
    } else {
        println!("   ✓ {}", response.message().unwrap_or("captured"));
        if let Some(image) = response.image() {
            println!("   Image: {} base64 characters", image.len());
        }
    }

    Ok(())
}
