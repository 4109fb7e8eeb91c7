use crate::{
    console::Console,
    process::{CommandLine, CommandResult, CommandRunner},
};
use anyhow::Result;
use std::fmt;

/// Whether a failed command prints its own error lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reporting {
    Report,
    Suppress,
}

/// A fatal problem caused by how the tool was invoked (exit status 1),
/// as opposed to a broken environment (exit status 2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserError(pub String);

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for UserError {}

/// Everything an action needs: the console to talk to the user and the runner
/// to reach external tools.
pub struct Session<'a> {
    pub console: Console,
    runner: &'a dyn CommandRunner,
}

impl<'a> Session<'a> {
    pub fn new(console: Console, runner: &'a dyn CommandRunner) -> Self {
        Self { console, runner }
    }

    /// Run one command, once. Failures come back as `success == false` and are
    /// printed unless `reporting` is `Suppress`. Only a command that cannot be
    /// started at all is an `Err`.
    pub fn run(&mut self, command: &CommandLine, reporting: Reporting) -> Result<CommandResult> {
        let result = self.runner.execute(command)?;
        if !result.success && reporting == Reporting::Report {
            self.console
                .error(&format!("Error executing command: '{command}'"));
            self.console.error(&format!("Error: {}", result.stderr));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{process::mock::MockRunner, test_utils::scripted_console};

    #[test]
    fn test_failed_command_is_reported() {
        let runner = MockRunner::new().respond(
            "git branch -d topic",
            CommandResult::failed("error: branch 'topic' not found."),
        );
        let (console, out) = scripted_console("");
        let mut session = Session::new(console, &runner);

        let cmd = CommandLine::new("git").args(["branch", "-d", "topic"]);
        let result = session.run(&cmd, Reporting::Report).unwrap();

        assert!(!result.success);
        assert_eq!(
            out.contents(),
            "❌  Error executing command: 'git branch -d topic'\n❌  Error: error: branch 'topic' not found.\n"
        );
    }

    #[test]
    fn test_suppressed_failure_writes_nothing() {
        let runner =
            MockRunner::new().respond("git stash pop", CommandResult::failed("No stash entries found."));
        let (console, out) = scripted_console("");
        let mut session = Session::new(console, &runner);

        let cmd = CommandLine::new("git").args(["stash", "pop"]);
        let result = session.run(&cmd, Reporting::Suppress).unwrap();

        assert!(!result.success);
        assert_eq!(result.stderr, "No stash entries found.");
        assert!(out.contents().is_empty());
    }

    #[test]
    fn test_success_writes_nothing() {
        let runner = MockRunner::new().respond("git fetch", CommandResult::ok(""));
        let (console, out) = scripted_console("");
        let mut session = Session::new(console, &runner);

        let result = session
            .run(&CommandLine::new("git").arg("fetch"), Reporting::Report)
            .unwrap();
        assert!(result.success);
        assert!(out.contents().is_empty());
        assert_eq!(runner.calls(), vec!["git fetch"]);
    }

    #[test]
    fn test_missing_program_propagates() {
        let runner = MockRunner::new().missing("git");
        let (console, _out) = scripted_console("");
        let mut session = Session::new(console, &runner);

        let err = session
            .run(&CommandLine::new("git").arg("status"), Reporting::Suppress)
            .unwrap_err();
        assert!(err.to_string().contains("'git' command not found"));
    }
}
