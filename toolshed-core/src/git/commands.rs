//! Argument vectors for every git invocation the branch manager makes.

use crate::{constants::GIT_PROGRAM, process::CommandLine};

const COLOR_ALWAYS: &str = "--color=always";
const SHORT_REFNAME: &str = "--format=%(refname:short)";

fn git() -> CommandLine {
    CommandLine::new(GIT_PROGRAM)
}

pub fn is_inside_work_tree() -> CommandLine {
    git().args(["rev-parse", "--is-inside-work-tree"])
}

pub fn current_branch() -> CommandLine {
    git().args(["rev-parse", "--abbrev-ref", "HEAD"])
}

pub fn list_local(color: bool) -> CommandLine {
    git()
        .args(["branch", "--sort=-committerdate"])
        .arg_if(color, COLOR_ALWAYS)
}

pub fn list_remote(color: bool) -> CommandLine {
    git()
        .args(["branch", "-r", "--sort=-committerdate"])
        .arg_if(color, COLOR_ALWAYS)
}

pub fn fetch(prune: bool) -> CommandLine {
    git().arg("fetch").arg_if(prune, "--prune")
}

/// Local branches with their upstream tracking status.
pub fn branch_verbose() -> CommandLine {
    git().args(["branch", "-vv"])
}

pub fn local_branch_names() -> CommandLine {
    git().args(["branch", SHORT_REFNAME])
}

/// Remote-tracking branches as git prints them, including symbolic refs.
pub fn remote_branches() -> CommandLine {
    git().args(["branch", "-r"])
}

pub fn remote_branch_names() -> CommandLine {
    git().args(["branch", "-r", SHORT_REFNAME])
}

pub fn delete_branch(name: &str, force: bool) -> CommandLine {
    git()
        .arg("branch")
        .arg(if force { "-D" } else { "-d" })
        .arg(name)
}

pub fn track(name: &str, remote: &str) -> CommandLine {
    git()
        .args(["branch", "--track", name])
        .arg(format!("{remote}/{name}"))
}

pub fn checkout(name: &str) -> CommandLine {
    git().args(["checkout", name])
}

pub fn delete_remote(remote: &str, branch: &str) -> CommandLine {
    git().args(["push", remote, "--delete", branch])
}

pub fn stash_push(message: Option<&str>) -> CommandLine {
    let cmd = git().args(["stash", "push"]);
    match message {
        Some(message) => cmd.args(["-m", message]),
        None => cmd,
    }
}

pub fn stash_list(color: bool) -> CommandLine {
    git().args(["stash", "list"]).arg_if(color, COLOR_ALWAYS)
}

pub fn stash_pop() -> CommandLine {
    git().args(["stash", "pop"])
}
