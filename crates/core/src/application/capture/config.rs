// Capture Configuration
// Explicit replacement for ambient process state (cwd, timeout, command)

use crate::application::constants::{
    DEFAULT_CAPTURE_TIMEOUT_MS, DEFAULT_COMMAND_LINE, DEFAULT_MAX_OUTPUT_BYTES,
};
use crate::error::{AppError, Result};
use crate::port::ProcessSpec;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Program plus arguments, executed directly (no shell)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Result<Self> {
        let program = program.into();
        if program.trim().is_empty() {
            return Err(AppError::Config("Command line cannot be empty".to_string()));
        }
        Ok(Self { program, args })
    }

    /// Split a whitespace-separated command line, e.g. `python Scanner.py`
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| AppError::Config("Command line cannot be empty".to_string()))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl FromStr for CommandLine {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl Default for CommandLine {
    fn default() -> Self {
        Self {
            program: "python".to_string(),
            args: vec!["Scanner.py".to_string()],
        }
    }
}

/// Capture invocation configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    pub working_dir: PathBuf,
    pub timeout_ms: u64,
    pub command_line: CommandLine,
    pub max_output_bytes: usize,
}

impl CaptureConfig {
    /// Defaults with the working directory taken from the current process
    pub fn from_current_dir() -> Result<Self> {
        Ok(Self {
            working_dir: std::env::current_dir()?,
            ..Self::default()
        })
    }

    pub fn with_command(mut self, command_line: CommandLine) -> Self {
        self.command_line = command_line;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_working_dir(mut self, working_dir: impl Into<PathBuf>) -> Self {
        self.working_dir = working_dir.into();
        self
    }

    pub fn with_max_output_bytes(mut self, max_output_bytes: usize) -> Self {
        self.max_output_bytes = max_output_bytes;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(AppError::Config("timeout_ms must be positive".to_string()));
        }
        if self.max_output_bytes == 0 {
            return Err(AppError::Config(
                "max_output_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_process_spec(&self) -> ProcessSpec {
        ProcessSpec {
            program: self.command_line.program.clone(),
            args: self.command_line.args.clone(),
            working_dir: self.working_dir.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            max_output_bytes: self.max_output_bytes,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            timeout_ms: DEFAULT_CAPTURE_TIMEOUT_MS,
            command_line: CommandLine::parse(DEFAULT_COMMAND_LINE).unwrap_or_default(),
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_line() {
        let cmd = CommandLine::parse("  python3   Scanner.py --once ").unwrap();
        assert_eq!(cmd.program, "python3");
        assert_eq!(cmd.args, vec!["Scanner.py", "--once"]);
        assert_eq!(cmd.to_string(), "python3 Scanner.py --once");
    }

    #[test]
    fn test_parse_empty_command_line() {
        let result = CommandLine::parse("   ");
        assert!(matches!(result, Err(AppError::Config(_))));
        assert!(CommandLine::new("", vec![]).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = CaptureConfig::default();
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.command_line.to_string(), "python Scanner.py");
        assert_eq!(config.max_output_bytes, 1024 * 1024);
    }

    #[test]
    fn test_from_current_dir() {
        let config = CaptureConfig::from_current_dir().unwrap();
        assert_eq!(config.working_dir, std::env::current_dir().unwrap());
        assert_eq!(config.timeout_ms, 30_000);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = CaptureConfig::default().with_timeout_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_process_spec() {
        let config = CaptureConfig::default()
            .with_working_dir("/opt/scanner")
            .with_timeout_ms(1500);
        let spec = config.to_process_spec();

        assert_eq!(spec.program, "python");
        assert_eq!(spec.args, vec!["Scanner.py"]);
        assert_eq!(spec.working_dir, PathBuf::from("/opt/scanner"));
        assert_eq!(spec.timeout_ms(), 1500);
    }
}
