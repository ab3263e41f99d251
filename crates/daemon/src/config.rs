//! Daemon configuration from environment variables

use anyhow::{Context, Result};
use fingerprint_api_rpc::server::RpcServerConfig;
use fingerprint_core::application::constants::{
    DEFAULT_CAPTURE_TIMEOUT_MS, DEFAULT_COMMAND_LINE, DEFAULT_MAX_OUTPUT_BYTES,
};
use fingerprint_core::application::{CaptureConfig, CommandLine};
use fingerprint_core::AppError;
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_COMMAND: &str = "FINGERPRINT_COMMAND";
pub const ENV_WORKDIR: &str = "FINGERPRINT_WORKDIR";
pub const ENV_TIMEOUT_MS: &str = "FINGERPRINT_TIMEOUT_MS";
pub const ENV_MAX_OUTPUT_BYTES: &str = "FINGERPRINT_MAX_OUTPUT_BYTES";
pub const ENV_RPC_HOST: &str = "FINGERPRINT_RPC_HOST";
pub const ENV_RPC_PORT: &str = "FINGERPRINT_RPC_PORT";
pub const ENV_LOG_FORMAT: &str = "FINGERPRINT_LOG_FORMAT";
pub const ENV_LOG_DIR: &str = "FINGERPRINT_LOG_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_env_value(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Everything the daemon needs to start
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub capture: CaptureConfig,
    pub rpc: RpcServerConfig,
    pub log_format: LogFormat,
    pub log_dir: Option<PathBuf>,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let command_line = CommandLine::parse(
            &lookup(ENV_COMMAND).unwrap_or_else(|| DEFAULT_COMMAND_LINE.to_string()),
        )
        .context("Invalid FINGERPRINT_COMMAND")?;

        let base = match lookup(ENV_WORKDIR) {
            Some(dir) => CaptureConfig::default()
                .with_working_dir(shellexpand::tilde(&dir).into_owned()),
            None => CaptureConfig::from_current_dir()
                .context("Cannot determine current directory")?,
        };

        let capture = base
            .with_command(command_line)
            .with_timeout_ms(parse_or(&lookup, ENV_TIMEOUT_MS, DEFAULT_CAPTURE_TIMEOUT_MS)?)
            .with_max_output_bytes(parse_or(&lookup, ENV_MAX_OUTPUT_BYTES, DEFAULT_MAX_OUTPUT_BYTES)?);
        capture.validate()?;

        let defaults = RpcServerConfig::default();
        let rpc = RpcServerConfig {
            host: lookup(ENV_RPC_HOST).unwrap_or(defaults.host),
            port: parse_or(&lookup, ENV_RPC_PORT, defaults.port)?,
        };

        Ok(Self {
            capture,
            rpc,
            log_format: LogFormat::from_env_value(lookup(ENV_LOG_FORMAT)),
            log_dir: lookup(ENV_LOG_DIR).map(|dir| PathBuf::from(shellexpand::tilde(&dir).into_owned())),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{}={:?}: {}", key, raw, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<DaemonConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DaemonConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(config.capture.command_line.to_string(), "python Scanner.py");
        assert_eq!(config.capture.timeout_ms, 30_000);
        assert_eq!(config.capture.working_dir, std::env::current_dir().unwrap());
        assert_eq!(config.rpc.port, 9530);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            (ENV_COMMAND, "python3 /opt/scanner/Scanner.py"),
            (ENV_WORKDIR, "/opt/scanner"),
            (ENV_TIMEOUT_MS, "45000"),
            (ENV_RPC_PORT, "8080"),
            (ENV_LOG_FORMAT, "json"),
        ])
        .unwrap();

        assert_eq!(config.capture.command_line.program, "python3");
        assert_eq!(config.capture.working_dir, PathBuf::from("/opt/scanner"));
        assert_eq!(config.capture.timeout_ms, 45_000);
        assert_eq!(config.rpc.port, 8080);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let err = config(&[(ENV_TIMEOUT_MS, "soon")]).unwrap_err();
        assert!(err.to_string().contains("FINGERPRINT_TIMEOUT_MS"));

        assert!(config(&[(ENV_TIMEOUT_MS, "0")]).is_err());
    }

    #[test]
    fn test_workdir_is_tilde_expanded() {
        let config = config(&[(ENV_WORKDIR, "~/scanner"), (ENV_MAX_OUTPUT_BYTES, "2048")]).unwrap();

        let expected = PathBuf::from(shellexpand::tilde("~/scanner").into_owned());
        assert_eq!(config.capture.working_dir, expected);
        assert_eq!(config.capture.max_output_bytes, 2048);
        assert_eq!(config.capture.command_line.to_string(), "python Scanner.py");
    }

    #[test]
    fn test_empty_command_is_rejected() {
        assert!(config(&[(ENV_COMMAND, "  ")]).is_err());
    }
}
