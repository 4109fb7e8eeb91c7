use super::{CommandLine, CommandResult, provider::CommandRunner};
use anyhow::{Context, Result};
use std::{
    io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

#[derive(Debug, Default)]
pub struct SystemRunner {
    working_dir: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every command inside `dir` instead of the process working directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            working_dir: Some(dir.to_path_buf()),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn execute(&self, command: &CommandLine) -> Result<CommandResult> {
        log::debug!("running: {command}");
        let mut process = Command::new(command.program());
        process
            .args(command.get_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            process.current_dir(dir);
        }

        let output = match process.output() {
            Ok(output) => output,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::error!("{} not found: {err}", command.program());
                anyhow::bail!(
                    "'{}' command not found. Is it installed and in your PATH?",
                    command.program()
                );
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to launch '{command}'"));
            }
        };

        let result = CommandResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim_end().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        };
        if !result.success {
            log::debug!(
                "'{command}' exited with {}: {}",
                output.status.code().unwrap_or(-1),
                result.stderr
            );
        }
        Ok(result)
    }
}
