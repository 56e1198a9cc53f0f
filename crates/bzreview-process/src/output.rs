/// Output captured from a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Raw stdout bytes
    pub stdout: Vec<u8>,
    /// Stderr, lossily decoded
    pub stderr: String,
    /// Exit code from the process (-1 when killed by a signal)
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<Vec<u8>>, stderr: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// Check if the process exited successfully
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout decoded as UTF-8, replacing invalid sequences
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Stdout followed by stderr, the way a terminal would show them
    pub fn combined_text(&self) -> String {
        let stdout = self.stdout_text();
        if self.stderr.is_empty() {
            stdout
        } else if stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}{}", stdout, self.stderr)
        }
    }

    /// Whether this exit status is acceptable under `policy`
    pub fn is_non_fatal(&self, policy: ExitPolicy) -> bool {
        self.success() || policy.tolerates(self.exit_code)
    }
}

/// Which non-zero exit codes a caller is willing to treat as non-fatal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Any non-zero exit is a failure
    Strict,
    /// The listed codes are tolerated; everything else non-zero fails
    AllowCodes(&'static [i32]),
    /// Exit status is never an error signal by itself
    IgnoreAll,
}

impl ExitPolicy {
    pub fn tolerates(self, code: i32) -> bool {
        match self {
            ExitPolicy::Strict => code == 0,
            ExitPolicy::AllowCodes(codes) => code == 0 || codes.contains(&code),
            ExitPolicy::IgnoreAll => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_policy_rejects_non_zero() {
        let output = CommandOutput::new("", "boom", 1);
        assert!(!output.is_non_fatal(ExitPolicy::Strict));
        assert!(CommandOutput::new("ok", "", 0).is_non_fatal(ExitPolicy::Strict));
    }

    #[test]
    fn test_allow_codes_only_tolerates_listed() {
        let policy = ExitPolicy::AllowCodes(&[3]);
        assert!(CommandOutput::new("", "", 3).is_non_fatal(policy));
        assert!(!CommandOutput::new("", "", 4).is_non_fatal(policy));
    }

    #[test]
    fn test_ignore_all_tolerates_everything() {
        assert!(CommandOutput::new("", "", 1).is_non_fatal(ExitPolicy::IgnoreAll));
        assert!(CommandOutput::new("", "", -1).is_non_fatal(ExitPolicy::IgnoreAll));
    }

    #[test]
    fn test_combined_text() {
        assert_eq!(CommandOutput::new("out\n", "err\n", 0).combined_text(), "out\nerr\n");
        assert_eq!(CommandOutput::new("", "err", 0).combined_text(), "err");
        assert_eq!(CommandOutput::new("out", "", 0).combined_text(), "out");
    }
}
