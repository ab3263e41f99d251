//! Fingerprint CLI - Command-line interface for Fingerprint Bridge

use anyhow::{Context, Result};
use base64::Engine;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9530";

#[derive(Parser)]
#[command(name = "fingerprint")]
#[command(about = "Fingerprint Bridge CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "FINGERPRINT_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture one fingerprint
    Capture {
        /// Print the raw JSON result instead of a summary
        #[arg(long)]
        json: bool,

        /// Decode the captured image and write it as PNG
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Show daemon status
    Health,
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Tabled)]
struct CaptureSummary {
    status: String,
    message: String,
    image: String,
}

impl CaptureSummary {
    fn from_result(result: &serde_json::Value) -> Self {
        let field = |name: &str| {
            result
                .get(name)
                .and_then(|v| v.as_str())
                .unwrap_or("-")
                .to_string()
        };

        let image = match result.get("image").and_then(|v| v.as_str()) {
            Some(image) => format!("{:.1} KB (base64)", image.len() as f64 / 1024.0),
            None => "-".to_string(),
        };

        Self {
            status: field("status"),
            message: field("message"),
            image,
        }
    }
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

fn save_image(result: &serde_json::Value, path: &Path) -> Result<()> {
    let encoded = result
        .get("image")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow::anyhow!("Capture result contains no image"))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .context("Image is not valid base64")?;

    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Capture { json, save } => {
            if !json {
                println!("{}", "Place a finger on the scanner...".cyan().bold());
            }

            let result = call_rpc(&cli.rpc_url, "fingerprint.capture.v1", json!({})).await?;
            let failed = result.get("status").and_then(|v| v.as_str()) == Some("error");

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                if failed {
                    println!("{}", "✗ Capture failed".red().bold());
                } else {
                    println!("{}", "✓ Capture completed".green().bold());
                }
                println!();

                let table = Table::new(vec![CaptureSummary::from_result(&result)]).to_string();
                println!("{}", table);
            }

            if let Some(path) = save {
                save_image(&result, &path)?;
                if !json {
                    println!("{} {}", "Image saved to".bold(), path.display());
                }
            }

            if failed {
                std::process::exit(1);
            }
        }

        Commands::Health => {
            println!("{}", "Daemon Status".cyan().bold());
            println!();

            match call_rpc(&cli.rpc_url, "system.health.v1", json!({})).await {
                Ok(health) => {
                    println!("  {} {}", "RPC URL:".bold(), cli.rpc_url);
                    println!("  {} {}", "Status:".bold(), "ONLINE".green());
                    println!("  {} {}", "Version:".bold(), health["version"]);
                    println!("  {} {}", "Command:".bold(), health["command"]);
                    println!("  {} {} ms", "Timeout:".bold(), health["timeout_ms"]);
                    println!("  {} {} seconds", "Uptime:".bold(), health["uptime_seconds"]);
                }
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "ERROR".red());
                    println!("  {} {}", "Error:".bold(), e);
                }
            }
        }
    }

    Ok(())
}
