use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, trace};

use crate::{CommandOutput, ExitPolicy};

/// Errors that can occur while running an external command
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Empty command line")]
    EmptyCommand,

    #[error("Failed to spawn {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{argv}` exited with status {exit_code}: {stderr}")]
    CommandFailed {
        argv: String,
        exit_code: i32,
        stderr: String,
    },
}

/// Anything that can run a command line to completion
pub trait ProcessRunner {
    /// Run `argv` and capture its output. A non-zero exit is not an error here.
    fn run(&self, argv: &[&str]) -> Result<CommandOutput, ProcessError>;

    /// Check whether `argv` can be run and exits successfully
    fn check_install(&self, argv: &[&str]) -> bool {
        match self.run(argv) {
            Ok(output) => output.success(),
            Err(e) => {
                debug!(error = %e, "Install check failed");
                false
            }
        }
    }

    /// Run `argv` and fail unless the exit status is acceptable under `policy`
    fn execute(&self, argv: &[&str], policy: ExitPolicy) -> Result<CommandOutput, ProcessError> {
        let output = self.run(argv)?;
        if output.is_non_fatal(policy) {
            Ok(output)
        } else {
            Err(ProcessError::CommandFailed {
                argv: argv.join(" "),
                exit_code: output.exit_code,
                stderr: output.stderr.trim_end().to_string(),
            })
        }
    }
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    working_dir: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, argv: &[&str]) -> Result<CommandOutput, ProcessError> {
        let (program, args) = argv.split_first().ok_or(ProcessError::EmptyCommand)?;
        let start = Instant::now();

        debug!(program = %program, args = ?args, "Spawning process");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null()) // Non-interactive
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|source| ProcessError::SpawnFailed {
            program: program.to_string(),
            source,
        })?;

        let exit_code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        trace!(stderr = %stderr, "stderr");

        debug!(
            exit_code,
            stdout_len = output.stdout.len(),
            duration_ms = start.elapsed().as_millis(),
            "Process completed"
        );

        Ok(CommandOutput::new(output.stdout, stderr, exit_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_argv_is_rejected() {
        let runner = SystemRunner::new();
        assert!(matches!(runner.run(&[]), Err(ProcessError::EmptyCommand)));
    }

    #[test]
    fn test_missing_binary_fails_install_check() {
        let runner = SystemRunner::new();
        assert!(!runner.check_install(&["bzreview-definitely-not-installed", "help"]));
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_applies_policy() {
        let runner = SystemRunner::new();
        let err = runner
            .execute(&["sh", "-c", "echo nope >&2; exit 3"], ExitPolicy::Strict)
            .unwrap_err();
        match err {
            ProcessError::CommandFailed {
                exit_code, stderr, ..
            } => {
                assert_eq!(exit_code, 3);
                assert_eq!(stderr, "nope");
            }
            other => panic!("unexpected error: {other}"),
        }

        let output = runner
            .execute(&["sh", "-c", "printf hi; exit 3"], ExitPolicy::AllowCodes(&[3]))
            .unwrap();
        assert_eq!(output.stdout_text(), "hi");
        assert_eq!(output.exit_code, 3);
    }
}
