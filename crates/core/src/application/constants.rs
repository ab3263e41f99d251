// Capture constants (no magic values)
use std::time::Duration;

/// Command line used when none is configured
pub const DEFAULT_COMMAND_LINE: &str = "python Scanner.py";

/// Wall-clock ceiling on one capture invocation (30 seconds)
pub const DEFAULT_CAPTURE_TIMEOUT_MS: u64 = 30_000;

/// Per-stream cap on captured output (1 MiB)
/// Large enough for a base64-encoded fingerprint PNG
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 1024 * 1024;

/// Time a timed-out process gets between SIGTERM and SIGKILL
pub const GRACEFUL_KILL_TIMEOUT: Duration = Duration::from_millis(2_000);

/// Poll interval while waiting for a terminated process to exit
pub const KILL_POLL_INTERVAL: Duration = Duration::from_millis(50);
