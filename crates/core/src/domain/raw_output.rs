// Raw Output Domain Model

/// Captured output of one finished process
///
/// Transient: owned by the invocation and dropped after parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// None when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub duration_ms: i64,
}

impl RawOutput {
    pub fn new(stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>, exit_code: Option<i32>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
            duration_ms: 0,
        }
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn has_stderr(&self) -> bool {
        self.stderr.iter().any(|b| !b.is_ascii_whitespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_termination_is_not_success() {
        let output = RawOutput::new("{}", "", None);
        assert!(!output.success());
    }

    #[test]
    fn test_lossy_text_decoding() {
        let output = RawOutput::new(vec![b'o', b'k', 0xff], "warn\n", Some(0));
        assert_eq!(output.stdout_text(), "ok\u{fffd}");
        assert!(output.has_stderr());
        assert!(!RawOutput::new("x", " \n", Some(0)).has_stderr());
    }
}
