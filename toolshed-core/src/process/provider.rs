use super::{CommandLine, CommandResult};
use anyhow::Result;

pub trait CommandRunner {
    /// Run `command` to completion. `Err` means the process could not be started
    /// at all; a non-zero exit is an `Ok` result with `success == false`.
    fn execute(&self, command: &CommandLine) -> Result<CommandResult>;
}
