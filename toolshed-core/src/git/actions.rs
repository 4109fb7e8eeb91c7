use super::{
    RemoteBranch, commands, parse_branch_names, parse_remote_branches, parse_stale_branches,
    untracked_remote_branches,
};
use crate::{
    batch,
    config::GitConfig,
    console::Choice,
    constants::NO_LOCAL_CHANGES,
    menu::{Menu, MenuEntry},
    session::{Reporting, Session, UserError},
};
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitAction {
    ListLocal,
    ListRemote,
    PruneStale,
    SyncRemote,
    Switch,
    Delete,
    Stash,
}

impl MenuEntry for GitAction {
    const ALL: &'static [Self] = &[
        Self::ListLocal,
        Self::ListRemote,
        Self::PruneStale,
        Self::SyncRemote,
        Self::Switch,
        Self::Delete,
        Self::Stash,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::ListLocal => "1",
            Self::ListRemote => "2",
            Self::PruneStale => "3",
            Self::SyncRemote => "4",
            Self::Switch => "5",
            Self::Delete => "6",
            Self::Stash => "7",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::ListLocal => "List local branches",
            Self::ListRemote => "List remote branches",
            Self::PruneStale => "Prune stale local branches",
            Self::SyncRemote => "Sync new remote branches",
            Self::Switch => "Switch branch",
            Self::Delete => "Delete a branch...",
            Self::Stash => "Stash Manager...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAction {
    Local,
    Remote,
}

impl MenuEntry for DeleteAction {
    const ALL: &'static [Self] = &[Self::Local, Self::Remote];

    fn key(self) -> &'static str {
        match self {
            Self::Local => "1",
            Self::Remote => "2",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Local => "Delete local branch",
            Self::Remote => "Delete remote branch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StashAction {
    Create,
    List,
    Apply,
}

impl MenuEntry for StashAction {
    const ALL: &'static [Self] = &[Self::Create, Self::List, Self::Apply];

    fn key(self) -> &'static str {
        match self {
            Self::Create => "1",
            Self::List => "2",
            Self::Apply => "3",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Create => "Create stash",
            Self::List => "List stashes",
            Self::Apply => "Apply (pop) stash",
        }
    }
}

/// Interactive branch manager. Fails with a `UserError` outside a work tree.
pub fn run_git_manager(session: &mut Session<'_>, config: &GitConfig) -> Result<()> {
    ensure_repository(session)?;
    Menu::<GitAction>::new("--- Git Branch Manager ---", "e", "Exit")
        .with_separators()
        .farewell("Exiting. Goodbye!")
        .run(session, |session, action| dispatch(session, config, action))
}

pub fn ensure_repository(session: &mut Session<'_>) -> Result<()> {
    let result = session.run(&commands::is_inside_work_tree(), Reporting::Suppress)?;
    if result.success && result.stdout.trim() == "true" {
        return Ok(());
    }
    Err(UserError(
        "This is not a Git repository. Please run toolshed from a repo directory.".to_string(),
    )
    .into())
}

pub fn dispatch(session: &mut Session<'_>, config: &GitConfig, action: GitAction) -> Result<()> {
    match action {
        GitAction::ListLocal => list_local_branches(session, config),
        GitAction::ListRemote => list_remote_branches(session, config),
        GitAction::PruneStale => prune_stale_branches(session),
        GitAction::SyncRemote => sync_remote_branches(session, config),
        GitAction::Switch => switch_branch(session),
        GitAction::Delete => Menu::<DeleteAction>::new("--- Delete a Branch ---", "b", "Back")
            .nested()
            .run(session, |session, action| match action {
                DeleteAction::Local => delete_local_branch(session),
                DeleteAction::Remote => delete_remote_branch(session),
            }),
        GitAction::Stash => Menu::<StashAction>::new("--- Stash Manager ---", "b", "Back to main menu")
            .nested()
            .run(session, |session, action| match action {
                StashAction::Create => create_stash(session),
                StashAction::List => list_stashes(session, config),
                StashAction::Apply => apply_stash(session),
            }),
    }
}

fn print_output(session: &mut Session<'_>, output: &str) {
    if !output.is_empty() {
        session.console.line(output);
    }
}

pub fn list_local_branches(session: &mut Session<'_>, config: &GitConfig) -> Result<()> {
    session.console.info("Listing local branches...");
    let result = session.run(&commands::list_local(config.color), Reporting::Report)?;
    if result.success {
        print_output(session, &result.stdout);
    }
    Ok(())
}

pub fn list_remote_branches(session: &mut Session<'_>, config: &GitConfig) -> Result<()> {
    session.console.info("Listing remote branches...");
    let result = session.run(&commands::list_remote(config.color), Reporting::Report)?;
    if result.success {
        if result.stdout.is_empty() {
            session.console.warning("No remote branches found.");
        } else {
            print_output(session, &result.stdout);
        }
    }
    Ok(())
}

/// Offer to delete local branches whose upstream no longer exists.
pub fn prune_stale_branches(session: &mut Session<'_>) -> Result<()> {
    session.console.info("Checking for stale local branches...");
    session.console.line("   Fetching from remote and pruning...");
    session.run(&commands::fetch(true), Reporting::Report)?;

    let verbose = session.run(&commands::branch_verbose(), Reporting::Report)?;
    if !verbose.success {
        return Ok(());
    }

    let (checked_out, stale): (Vec<_>, Vec<_>) = parse_stale_branches(&verbose.stdout)
        .into_iter()
        .partition(|branch| branch.checked_out);
    for branch in &checked_out {
        session.console.warning(&format!(
            "Branch '{}' is stale but checked out; switch away from it to delete it.",
            branch.name
        ));
    }
    let stale: Vec<String> = stale.into_iter().map(|branch| branch.name).collect();

    if stale.is_empty() {
        if checked_out.is_empty() {
            session.console.success("No stale local branches found.");
        }
        return Ok(());
    }

    session.console.blank();
    session
        .console
        .warning("The following local branches track remote branches that have been deleted:");
    session.console.bullets(&stale);
    session.console.blank();

    if !session
        .console
        .confirm("Do you want to delete these local branches?")?
    {
        session.console.info("Aborted. No branches were deleted.");
        return Ok(());
    }

    let outcome = batch::run_each(
        session,
        &stale,
        Clone::clone,
        |branch| format!("   Deleting branch '{branch}'..."),
        |branch| commands::delete_branch(branch, false),
    )?;
    batch::report(session, &outcome, "Done.");
    Ok(())
}

/// Create local tracking branches for remote branches not present locally.
pub fn sync_remote_branches(session: &mut Session<'_>, config: &GitConfig) -> Result<()> {
    session.console.info("Syncing remote branches to local...");
    session.console.line("   Fetching all remote information...");
    session.run(&commands::fetch(false), Reporting::Report)?;

    let remote = session.run(&commands::remote_branches(), Reporting::Report)?;
    let local = session.run(&commands::local_branch_names(), Reporting::Report)?;
    if !remote.success || !local.success {
        return Ok(());
    }

    let local_names = parse_branch_names(&local.stdout);
    let new_branches = untracked_remote_branches(
        parse_remote_branches(&remote.stdout),
        &local_names,
        &config.remote,
    );

    if new_branches.is_empty() {
        session
            .console
            .success("Your local repository is already in sync with all remote branches.");
        return Ok(());
    }

    session.console.blank();
    session
        .console
        .info("The following new remote branches are available:");
    session
        .console
        .bullets(new_branches.iter().map(RemoteBranch::qualified));
    session.console.blank();

    if !session
        .console
        .confirm("Do you want to create local tracking branches for them?")?
    {
        session.console.info("Aborted. No new branches were created.");
        return Ok(());
    }

    let outcome = batch::run_each(
        session,
        &new_branches,
        |branch| branch.name.clone(),
        |branch| format!("   Creating and tracking '{}'...", branch.qualified()),
        |branch| commands::track(&branch.name, &branch.remote),
    )?;
    batch::report(session, &outcome, "Done.");
    Ok(())
}

/// Always asks git; the checked-out branch is never cached between actions.
fn current_branch(session: &mut Session<'_>) -> Result<Option<String>> {
    let result = session.run(&commands::current_branch(), Reporting::Suppress)?;
    Ok((result.success && !result.stdout.trim().is_empty())
        .then(|| result.stdout.trim().to_string()))
}

/// Local branches other than the checked-out one, or `None` if listing failed.
fn other_local_branches(session: &mut Session<'_>) -> Result<Option<Vec<Choice<String>>>> {
    let current = current_branch(session)?;
    let result = session.run(&commands::local_branch_names(), Reporting::Report)?;
    if !result.success {
        return Ok(None);
    }
    Ok(Some(
        parse_branch_names(&result.stdout)
            .iter()
            .filter(|name| current.as_deref() != Some(name.as_str()))
            .map(|name| Choice::named(name))
            .collect(),
    ))
}

pub fn switch_branch(session: &mut Session<'_>) -> Result<()> {
    let Some(branches) = other_local_branches(session)? else {
        return Ok(());
    };
    if branches.is_empty() {
        session
            .console
            .warning("No other local branches to switch to.");
        return Ok(());
    }

    let Some(branch) = session
        .console
        .select(&branches, "Select a branch to switch to:")?
    else {
        return Ok(());
    };

    session
        .console
        .info(&format!("Switching to branch '{branch}'..."));
    let result = session.run(&commands::checkout(branch), Reporting::Report)?;
    if result.success {
        session
            .console
            .success(&format!("Switched to branch '{branch}'."));
        print_output(session, &result.stdout);
    }
    Ok(())
}

pub fn delete_local_branch(session: &mut Session<'_>) -> Result<()> {
    let Some(branches) = other_local_branches(session)? else {
        return Ok(());
    };
    if branches.is_empty() {
        session.console.warning("No other local branches to delete.");
        return Ok(());
    }

    let Some(branch) = session
        .console
        .select(&branches, "Select a local branch to delete:")?
    else {
        return Ok(());
    };

    let force = session
        .console
        .confirm(&format!("Force delete '{branch}'? (requires -D flag)"))?;

    session
        .console
        .info(&format!("Attempting to delete '{branch}'..."));
    let result = session.run(&commands::delete_branch(branch, force), Reporting::Report)?;
    if result.success {
        if result.stdout.is_empty() {
            session
                .console
                .success(&format!("Deleted branch '{branch}'."));
        } else {
            session.console.success(&result.stdout);
        }
    }
    Ok(())
}

pub fn delete_remote_branch(session: &mut Session<'_>) -> Result<()> {
    let result = session.run(&commands::remote_branch_names(), Reporting::Report)?;
    if !result.success {
        return Ok(());
    }
    let branches: Vec<Choice<RemoteBranch>> = parse_remote_branches(&result.stdout)
        .into_iter()
        .map(|branch| Choice::new(branch.qualified(), branch))
        .collect();
    if branches.is_empty() {
        session.console.warning("No remote branches to delete.");
        return Ok(());
    }

    let Some(branch) = session
        .console
        .select(&branches, "Select a remote branch to delete:")?
    else {
        return Ok(());
    };

    let question = format!(
        "Are you sure you want to delete '{}' from remote?",
        branch.qualified()
    );
    if !session.console.confirm(&question)? {
        session.console.info("Delete operation aborted.");
        return Ok(());
    }

    session.console.info(&format!(
        "Deleting '{}' from remote '{}'...",
        branch.name, branch.remote
    ));
    let result = session.run(
        &commands::delete_remote(&branch.remote, &branch.name),
        Reporting::Report,
    )?;
    if result.success {
        session
            .console
            .success("Remote branch deleted successfully.");
        print_output(session, &result.stdout);
    }
    Ok(())
}

pub fn create_stash(session: &mut Session<'_>) -> Result<()> {
    let message = session
        .console
        .read_line("Enter an optional message for the stash: ")?;
    let message = (!message.is_empty()).then_some(message.as_str());

    let result = session.run(&commands::stash_push(message), Reporting::Suppress)?;
    if !result.success {
        session.console.error("Failed to stash changes.");
        if !result.stderr.is_empty() {
            session.console.error(&format!("Error: {}", result.stderr));
        }
    } else if result.stdout.contains(NO_LOCAL_CHANGES) {
        session.console.warning("No local changes to stash.");
    } else {
        session.console.success("Changes stashed successfully.");
    }
    Ok(())
}

pub fn list_stashes(session: &mut Session<'_>, config: &GitConfig) -> Result<()> {
    session.console.info("Listing stashes...");
    let result = session.run(&commands::stash_list(config.color), Reporting::Report)?;
    if !result.success {
        return Ok(());
    }
    if result.stdout.is_empty() {
        session.console.success("No stashes found.");
    } else {
        print_output(session, &result.stdout);
    }
    Ok(())
}

pub fn apply_stash(session: &mut Session<'_>) -> Result<()> {
    let stashes = session.run(&commands::stash_list(false), Reporting::Report)?;
    if !stashes.success {
        return Ok(());
    }
    if stashes.stdout.is_empty() {
        session.console.warning("No stashes to apply.");
        return Ok(());
    }

    session
        .console
        .info("Applying the most recent stash (git stash pop)...");
    let result = session.run(&commands::stash_pop(), Reporting::Report)?;
    if result.success {
        session.console.success("Stash applied successfully.");
        print_output(session, &result.stdout);
    }
    Ok(())
}
