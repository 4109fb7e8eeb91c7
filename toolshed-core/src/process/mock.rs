use super::{CommandLine, CommandResult, provider::CommandRunner};
use anyhow::Result;
use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

/// Scripted runner keyed by the displayed command line.
///
/// Responses queued for a command are returned in order; the last one repeats.
/// Commands without a scripted response succeed with empty output.
#[derive(Default)]
pub struct MockRunner {
    responses: Mutex<HashMap<String, VecDeque<CommandResult>>>,
    missing_programs: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn respond(self, command: &str, result: CommandResult) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(command.to_string())
            .or_default()
            .push_back(result);
        self
    }

    /// Behave as if `program` is not installed.
    #[must_use]
    pub fn missing(mut self, program: &str) -> Self {
        self.missing_programs.push(program.to_string());
        self
    }

    /// Every command executed so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Executed commands starting with `prefix`.
    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.starts_with(prefix))
            .collect()
    }
}

impl CommandRunner for MockRunner {
    fn execute(&self, command: &CommandLine) -> Result<CommandResult> {
        if self.missing_programs.iter().any(|p| p == command.program()) {
            anyhow::bail!(
                "'{}' command not found. Is it installed and in your PATH?",
                command.program()
            );
        }
        let key = command.to_string();
        self.calls.lock().unwrap().push(key.clone());

        let mut responses = self.responses.lock().unwrap();
        let result = match responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) => queue.front().cloned().unwrap_or_default(),
            None => CommandResult::ok(""),
        };
        Ok(result)
    }
}
