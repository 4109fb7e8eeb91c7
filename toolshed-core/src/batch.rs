use crate::{
    process::CommandLine,
    session::{Reporting, Session},
};
use anyhow::Result;

/// Per-item results of a multi-item mutation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

/// Run one mutating command per item. A failing item is reported and the
/// remaining items still run; there is no rollback.
pub fn run_each<T>(
    session: &mut Session<'_>,
    items: &[T],
    name: impl Fn(&T) -> String,
    progress: impl Fn(&T) -> String,
    command: impl Fn(&T) -> CommandLine,
) -> Result<BatchOutcome> {
    let mut outcome = BatchOutcome::default();
    for item in items {
        session.console.line(&progress(item));
        let result = session.run(&command(item), Reporting::Report)?;
        if result.success {
            outcome.succeeded.push(name(item));
        } else {
            outcome.failed.push(name(item));
        }
    }
    log::info!(
        "batch finished: {} succeeded, {} failed",
        outcome.succeeded.len(),
        outcome.failed.len()
    );
    Ok(outcome)
}

/// Summarise a batch: `done` when everything worked, otherwise a warning naming
/// the failed items.
pub fn report(session: &mut Session<'_>, outcome: &BatchOutcome, done: &str) {
    if outcome.failed.is_empty() {
        session.console.success(done);
    } else {
        session.console.warning(&format!(
            "{} of {} failed: {}",
            outcome.failed.len(),
            outcome.failed.len() + outcome.succeeded.len(),
            outcome.failed.join(", ")
        ));
    }
}
