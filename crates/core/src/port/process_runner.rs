// Process Runner Port
// Abstraction over spawning one external process and collecting its output

use crate::domain::{CaptureError, RawOutput};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Everything a runner needs to launch one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub timeout: Duration,
    /// Per-stream cap on captured bytes
    pub max_output_bytes: usize,
}

impl ProcessSpec {
    pub fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

/// Process runner errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Process timeout after {0}ms")]
    Timeout(u64),

    #[error("Output limit of {0} bytes exceeded")]
    OutputLimitExceeded(usize),

    #[error("IO error: {0}")]
    Io(String),
}

impl ProcessError {
    /// Attach the program name, which only the invoker knows in full
    pub fn into_capture_error(self, program: &str) -> CaptureError {
        match self {
            ProcessError::SpawnFailed(reason) => CaptureError::Launch {
                program: program.to_string(),
                reason,
            },
            ProcessError::Timeout(ms) => CaptureError::Timeout(ms),
            ProcessError::OutputLimitExceeded(limit) => CaptureError::OutputTooLarge(limit),
            ProcessError::Io(reason) => CaptureError::Io(reason),
        }
    }
}

/// Process Runner trait
///
/// Implementations:
/// - SubprocessRunner: spawns a real OS process (infra-system)
/// - MockProcessRunner: scripted outcomes for tests
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the process to completion and return its captured output
    ///
    /// A non-zero exit is NOT an error at this layer; it is reported through
    /// `RawOutput::exit_code`.
    ///
    /// # Errors
    /// - ProcessError::SpawnFailed if the process cannot be started
    /// - ProcessError::Timeout if it outlives `spec.timeout` (it is terminated first)
    /// - ProcessError::OutputLimitExceeded if a stream exceeds `spec.max_output_bytes`
    async fn run(&self, spec: &ProcessSpec) -> Result<RawOutput, ProcessError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock runner behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Exit with the given code after writing stdout/stderr
        Exit {
            stdout: String,
            stderr: String,
            code: Option<i32>,
        },
        /// Fail before or during execution
        Fail(ProcessError),
    }

    /// Mock Process Runner for testing
    pub struct MockProcessRunner {
        behavior: Arc<Mutex<MockBehavior>>,
        call_count: Arc<Mutex<usize>>,
        last_spec: Arc<Mutex<Option<ProcessSpec>>>,
    }

    impl MockProcessRunner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                call_count: Arc::new(Mutex::new(0)),
                last_spec: Arc::new(Mutex::new(None)),
            }
        }

        /// Exit 0 with the given stdout and no stderr
        pub fn new_stdout(stdout: impl Into<String>) -> Self {
            Self::new(MockBehavior::Exit {
                stdout: stdout.into(),
                stderr: String::new(),
                code: Some(0),
            })
        }

        pub fn new_exit(
            stdout: impl Into<String>,
            stderr: impl Into<String>,
            code: Option<i32>,
        ) -> Self {
            Self::new(MockBehavior::Exit {
                stdout: stdout.into(),
                stderr: stderr.into(),
                code,
            })
        }

        pub fn new_fail(error: ProcessError) -> Self {
            Self::new(MockBehavior::Fail(error))
        }

        pub fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }

        pub fn last_spec(&self) -> Option<ProcessSpec> {
            self.last_spec.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProcessRunner for MockProcessRunner {
        async fn run(&self, spec: &ProcessSpec) -> Result<RawOutput, ProcessError> {
            *self.call_count.lock().unwrap() += 1;
            *self.last_spec.lock().unwrap() = Some(spec.clone());

            let behavior = self.behavior.lock().unwrap().clone();

            match behavior {
                MockBehavior::Exit {
                    stdout,
                    stderr,
                    code,
                } => Ok(RawOutput::new(stdout, stderr, code)),
                MockBehavior::Fail(err) => Err(err),
            }
        }
    }
}
