// Subprocess runner implementation
// reason: async-trait, tokio for async process management
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

use fingerprint_core::application::constants::{GRACEFUL_KILL_TIMEOUT, KILL_POLL_INTERVAL};
use fingerprint_core::domain::RawOutput;
use fingerprint_core::port::{ProcessError, ProcessRunner, ProcessSpec, TimeProvider};

type StreamReader = JoinHandle<Result<Vec<u8>, ProcessError>>;

/// Subprocess runner
/// Spawns one child process per call with inherited environment
pub struct SubprocessRunner {
    time_provider: Arc<dyn TimeProvider>,
}

impl SubprocessRunner {
    /// Create a new subprocess runner
    ///
    /// # Arguments
    /// * `time_provider` - Time provider for duration tracking
    ///
    /// # Example
    /// ```ignore
    /// let runner = SubprocessRunner::new(Arc::new(SystemTimeProvider));
    /// ```
    pub fn new(time_provider: Arc<dyn TimeProvider>) -> Self {
        Self { time_provider }
    }

    fn spawn(&self, spec: &ProcessSpec) -> Result<Child, ProcessError> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .current_dir(&spec.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Own process group, so termination also reaches background helpers
        #[cfg(unix)]
        command.process_group(0);

        command
            .spawn()
            .map_err(|e| ProcessError::SpawnFailed(e.to_string()))
    }

    /// Drain a pipe in a background task, failing once `limit` is exceeded
    fn read_stream<R>(stream: Option<R>, limit: usize) -> StreamReader
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        tokio::spawn(async move {
            let mut buf = Vec::new();
            if let Some(stream) = stream {
                stream
                    .take(limit as u64 + 1)
                    .read_to_end(&mut buf)
                    .await
                    .map_err(|e| ProcessError::Io(e.to_string()))?;
            }
            if buf.len() > limit {
                return Err(ProcessError::OutputLimitExceeded(limit));
            }
            Ok(buf)
        })
    }

    async fn join_stream(handle: &mut StreamReader) -> Result<Vec<u8>, ProcessError> {
        handle
            .await
            .map_err(|e| ProcessError::Io(format!("output reader failed: {}", e)))?
    }

    /// Spawn child process and wait for output
    ///
    /// One deadline covers the exit AND the draining of both pipes: a
    /// background process holding stdout open cannot stretch the call.
    async fn spawn_and_wait(&self, spec: &ProcessSpec) -> Result<RawOutput, ProcessError> {
        let deadline = Instant::now() + spec.timeout;
        let mut child = self.spawn(spec)?;
        let pid = child.id();

        let mut stdout_reader = Self::read_stream(child.stdout.take(), spec.max_output_bytes);
        let mut stderr_reader = Self::read_stream(child.stderr.take(), spec.max_output_bytes);

        let collected = timeout_at(deadline, async {
            let status = child
                .wait()
                .await
                .map_err(|e| ProcessError::Io(e.to_string()))?;
            let stdout = Self::join_stream(&mut stdout_reader).await?;
            let stderr = Self::join_stream(&mut stderr_reader).await?;

            Ok::<_, ProcessError>(RawOutput {
                stdout,
                stderr,
                exit_code: status.code(),
                duration_ms: 0,
            })
        })
        .await;

        match collected {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    program = %spec.program,
                    timeout_ms = spec.timeout_ms(),
                    "Process exceeded timeout, terminating"
                );
                self.terminate(&mut child, pid).await;
                stdout_reader.abort();
                stderr_reader.abort();
                Err(ProcessError::Timeout(spec.timeout_ms()))
            }
        }
    }

    /// Kill the process group with SIGTERM first, then SIGKILL if needed
    ///
    /// `pid` is taken at spawn: tokio forgets it once the child is reaped.
    async fn terminate(&self, child: &mut Child, pid: Option<u32>) {
        #[cfg(unix)]
        if let Some(pid) = pid {
            use nix::sys::signal::{killpg, Signal};
            use nix::unistd::Pid;

            let pgid = Pid::from_raw(pid as i32);

            // Step 1: Send SIGTERM for graceful shutdown
            info!(pgid = %pgid, "Sending SIGTERM to process group");
            if let Err(e) = killpg(pgid, Signal::SIGTERM) {
                warn!(pgid = %pgid, error = %e, "SIGTERM failed");
            }

            // Step 2: Wait for the whole group to exit (poll until the grace period ends)
            let start_time = self.time_provider.now_millis();
            loop {
                // Reap the direct child so it does not linger as a zombie group member
                let _ = child.try_wait();

                if killpg(pgid, None).is_err() {
                    info!(pgid = %pgid, "Process group exited gracefully after SIGTERM");
                    return;
                }

                if self.time_provider.elapsed_since(start_time)
                    > GRACEFUL_KILL_TIMEOUT.as_millis() as i64
                {
                    warn!(pgid = %pgid, "Process group did not exit after SIGTERM, sending SIGKILL");
                    let _ = killpg(pgid, Signal::SIGKILL);
                    break;
                }

                tokio::time::sleep(KILL_POLL_INTERVAL).await;
            }
        }

        #[cfg(not(unix))]
        let _ = pid;

        // SIGKILL (or TerminateProcess on Windows), then reap
        if let Err(e) = child.kill().await {
            debug!(error = %e, "Kill after termination failed (process already exited)");
        }
    }
}

#[async_trait]
impl ProcessRunner for SubprocessRunner {
    async fn run(&self, spec: &ProcessSpec) -> Result<RawOutput, ProcessError> {
        let start_time = self.time_provider.now_millis();

        info!(
            program = %spec.program,
            args = ?spec.args,
            working_dir = %spec.working_dir.display(),
            timeout_ms = spec.timeout_ms(),
            "Starting subprocess execution"
        );

        let mut output = self.spawn_and_wait(spec).await?;
        output.duration_ms = self.time_provider.elapsed_since(start_time);

        info!(
            program = %spec.program,
            duration_ms = %output.duration_ms,
            exit_code = ?output.exit_code,
            "Subprocess execution completed"
        );

        Ok(output)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use fingerprint_core::port::time_provider::SystemTimeProvider;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    fn sh(script: &str, timeout_ms: u64) -> ProcessSpec {
        ProcessSpec {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            working_dir: PathBuf::from("."),
            timeout: Duration::from_millis(timeout_ms),
            max_output_bytes: 1024,
        }
    }

    fn runner() -> SubprocessRunner {
        SubprocessRunner::new(Arc::new(SystemTimeProvider))
    }

    #[tokio::test]
    async fn test_run_captures_both_streams() {
        let output = tokio_test::assert_ok!(runner().run(&sh("echo out; echo err 1>&2", 5_000)).await);

        assert_eq!(output.stdout_text(), "out\n");
        assert_eq!(output.stderr_text(), "err\n");
        assert_eq!(output.exit_code, Some(0));
    }

    #[tokio::test]
    async fn test_run_reports_non_zero_exit() {
        let output = runner().run(&sh("exit 3", 5_000)).await.unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
    }

    #[tokio::test]
    async fn test_run_timeout_terminates_process() {
        let started = Instant::now();
        let result = runner().run(&sh("sleep 10", 100)).await;

        assert_eq!(result, Err(ProcessError::Timeout(100)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_run_timeout_covers_background_holder_of_stdout() {
        // Shell exits at once; the backgrounded sleep keeps stdout open
        let started = Instant::now();
        let result = runner()
            .run(&sh(r#"(sleep 30) & echo '{"status":"ok"}'"#, 300))
            .await;

        assert_eq!(result, Err(ProcessError::Timeout(300)));
        assert!(started.elapsed() < Duration::from_millis(300) + GRACEFUL_KILL_TIMEOUT + Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_run_timeout_escalates_when_sigterm_ignored() {
        let started = Instant::now();
        let result = runner().run(&sh(r#"trap "" TERM; sleep 30"#, 300)).await;

        assert_eq!(result, Err(ProcessError::Timeout(300)));
        assert!(started.elapsed() < Duration::from_millis(300) + GRACEFUL_KILL_TIMEOUT + Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let spec = ProcessSpec {
            program: "definitely-not-a-real-binary-4242".to_string(),
            args: vec![],
            working_dir: PathBuf::from("."),
            timeout: Duration::from_secs(1),
            max_output_bytes: 1024,
        };

        let err = tokio_test::assert_err!(runner().run(&spec).await);

        assert!(matches!(err, ProcessError::SpawnFailed(_)));
    }

    #[tokio::test]
    async fn test_run_output_limit() {
        let result = runner()
            .run(&sh("head -c 4096 /dev/zero", 5_000))
            .await;

        assert_eq!(result, Err(ProcessError::OutputLimitExceeded(1024)));
    }

    #[tokio::test]
    async fn test_run_uses_working_dir() {
        let mut spec = sh("pwd", 5_000);
        spec.working_dir = std::env::temp_dir();

        let output = runner().run(&spec).await.unwrap();

        let expected = std::env::temp_dir().canonicalize().unwrap();
        let actual = PathBuf::from(output.stdout_text().trim()).canonicalize().unwrap();
        assert_eq!(actual, expected);
    }
}
