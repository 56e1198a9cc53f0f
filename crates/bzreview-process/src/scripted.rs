use std::cell::RefCell;
use std::io;

use crate::{CommandOutput, ProcessError, ProcessRunner};

/// Replays canned output for exact command lines and records every call.
///
/// A command line with no scripted response behaves like a missing binary.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Vec<(Vec<String>, CommandOutput)>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `argv` with `output`
    pub fn on(mut self, argv: &[&str], output: CommandOutput) -> Self {
        let argv = argv.iter().map(|s| s.to_string()).collect();
        self.responses.push((argv, output));
        self
    }

    /// Respond to `argv` with `stdout` and exit code 0
    pub fn on_stdout(self, argv: &[&str], stdout: &str) -> Self {
        self.on(argv, CommandOutput::new(stdout, "", 0))
    }

    /// Every command line run so far, in order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    /// Whether any recorded call starts with `prefix`
    pub fn was_called_with(&self, prefix: &[&str]) -> bool {
        self.calls.borrow().iter().any(|call| {
            call.len() >= prefix.len() && call.iter().zip(prefix).all(|(a, b)| a == b)
        })
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, argv: &[&str]) -> Result<CommandOutput, ProcessError> {
        self.calls
            .borrow_mut()
            .push(argv.iter().map(|s| s.to_string()).collect());

        self.responses
            .iter()
            .find(|(expected, _)| expected.iter().map(String::as_str).eq(argv.iter().copied()))
            .map(|(_, output)| output.clone())
            .ok_or_else(|| ProcessError::SpawnFailed {
                program: argv.first().unwrap_or(&"").to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no scripted response"),
            })
    }
}
