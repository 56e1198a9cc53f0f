use bzreview_process::{ExitPolicy, ProcessRunner};
use tracing::debug;

use crate::{Bzr, BzrError};

/// Exit code `bzr config` uses for an unknown option
const OPTION_MISSING_EXIT_CODE: i32 = 3;

/// Looks up single Bazaar configuration options
pub struct ConfigReader<'a, R> {
    bzr: &'a Bzr<R>,
}

impl<'a, R: ProcessRunner> ConfigReader<'a, R> {
    pub fn new(bzr: &'a Bzr<R>) -> Self {
        Self { bzr }
    }

    /// Value of option `name`, or `None` if it is not configured.
    ///
    /// An option configured to an empty string is `Some("")`.
    pub fn get(&self, name: &str) -> Result<Option<String>, BzrError> {
        let output = self.bzr.execute(
            &["config", name],
            ExitPolicy::AllowCodes(&[OPTION_MISSING_EXIT_CODE]),
        )?;

        if output.combined_text().contains(&missing_option_message(name)) {
            debug!(option = name, "Configuration option does not exist");
            return Ok(None);
        }

        let value = output.stdout_text().trim_end().to_string();
        debug!(option = name, value = %value, "Read configuration option");
        Ok(Some(value))
    }
}

fn missing_option_message(name: &str) -> String {
    format!("ERROR: The \"{}\" configuration option does not exist.", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bzreview_process::{CommandOutput, ProcessError, ScriptedRunner};

    fn missing(name: &str) -> CommandOutput {
        CommandOutput::new("", format!("{}\n", missing_option_message(name)), 3)
    }

    #[test]
    fn test_missing_option_is_none() {
        let bzr = Bzr::new(
            ScriptedRunner::new().on(&["bzr", "config", "submit_branch"], missing("submit_branch")),
        );
        assert_eq!(ConfigReader::new(&bzr).get("submit_branch").unwrap(), None);
    }

    #[test]
    fn test_missing_message_on_stdout_is_none() {
        let output = CommandOutput::new(missing_option_message("x"), "", 0);
        let bzr = Bzr::new(ScriptedRunner::new().on(&["bzr", "config", "x"], output));
        assert_eq!(ConfigReader::new(&bzr).get("x").unwrap(), None);
    }

    #[test]
    fn test_value_is_trimmed() {
        let bzr = Bzr::new(ScriptedRunner::new().on_stdout(
            &["bzr", "config", "parent_location"],
            "bzr+ssh://host/trunk/  \n",
        ));
        assert_eq!(
            ConfigReader::new(&bzr).get("parent_location").unwrap().as_deref(),
            Some("bzr+ssh://host/trunk/")
        );
    }

    #[test]
    fn test_empty_value_is_present() {
        let bzr = Bzr::new(ScriptedRunner::new().on_stdout(&["bzr", "config", "empty"], "\n"));
        assert_eq!(ConfigReader::new(&bzr).get("empty").unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_message_for_other_option_is_data() {
        // Only the message naming the requested option means "missing"
        let output = CommandOutput::new(missing_option_message("b"), "", 0);
        let bzr = Bzr::new(ScriptedRunner::new().on(&["bzr", "config", "a"], output));
        assert!(ConfigReader::new(&bzr).get("a").unwrap().is_some());
    }

    #[test]
    fn test_unexpected_exit_code_fails() {
        let bzr = Bzr::new(
            ScriptedRunner::new().on(&["bzr", "config", "x"], CommandOutput::new("", "bzr: broken", 4)),
        );
        let err = ConfigReader::new(&bzr).get("x").unwrap_err();
        assert!(matches!(
            err,
            BzrError::Process(ProcessError::CommandFailed { exit_code: 4, .. })
        ));
    }
}
