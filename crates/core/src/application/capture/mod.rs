// Fingerprint Capture Service - runs the capture script and parses its output

pub mod config;


pub use config::{CaptureConfig, CommandLine};

use crate::domain::{CaptureError, InvocationResult, Payload, RawOutput};
use crate::port::{IdProvider, ProcessRunner};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Fingerprint-Capture Invoker
///
/// Stateless across calls: every `capture()` spawns its own process and
/// shares nothing with concurrent calls.
pub struct FingerprintCapture {
    runner: Arc<dyn ProcessRunner>,
    id_provider: Arc<dyn IdProvider>,
    config: CaptureConfig,
}

impl FingerprintCapture {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        id_provider: Arc<dyn IdProvider>,
        config: CaptureConfig,
    ) -> Self {
        Self {
            runner,
            id_provider,
            config,
        }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Run the capture script once and return its result
    ///
    /// Never fails: launch, timeout, exit, empty-output and parse failures
    /// are all returned as `InvocationResult::Error`.
    pub async fn capture(&self) -> InvocationResult {
        let invocation_id = self.id_provider.generate_id();
        let span = info_span!("capture", invocation_id = %invocation_id);

        async {
            match self.try_capture().await {
                Ok(payload) => {
                    info!("Fingerprint capture completed");
                    InvocationResult::Ok(payload)
                }
                Err(e) => {
                    error!(error = %e, "Failed to execute capture script");
                    e.into_result()
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn try_capture(&self) -> Result<Payload, CaptureError> {
        let spec = self.config.to_process_spec();
        let command = self.config.command_line.to_string();

        info!(
            command = %command,
            working_dir = %spec.working_dir.display(),
            timeout_ms = spec.timeout_ms(),
            "Starting fingerprint capture"
        );

        let output = self
            .runner
            .run(&spec)
            .await
            .map_err(|e| e.into_capture_error(&command))?;

        parse_output(&output)
    }
}

/// Turn captured process output into the script's JSON document
///
/// stderr is diagnostic only. A non-zero exit fails even if stdout parses.
pub fn parse_output(output: &RawOutput) -> Result<Payload, CaptureError> {
    let stdout = output.stdout_text();

    debug!(
        exit_code = ?output.exit_code,
        duration_ms = output.duration_ms,
        stdout_bytes = output.stdout.len(),
        stdout = %stdout,
        "Capture script stdout"
    );

    let stderr = output.stderr_text();
    if output.has_stderr() {
        warn!(stderr = %stderr.trim(), "Capture script wrote to stderr");
    }

    if !output.success() {
        return Err(CaptureError::NonZeroExit {
            code: output.exit_code,
            stderr: stderr.trim().to_string(),
        });
    }

    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Err(CaptureError::EmptyOutput);
    }

    Ok(serde_json::from_str(trimmed)?)
}
