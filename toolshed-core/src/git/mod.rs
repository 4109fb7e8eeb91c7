pub mod actions;
pub mod commands;

pub use actions::{DeleteAction, GitAction, StashAction, run_git_manager};

use crate::constants::{SYMREF_ARROW, UPSTREAM_GONE_MARKER};
use regex::Regex;
use std::{collections::HashMap, sync::LazyLock};

/// `git branch -vv` line whose upstream is gone. The first column is `*` for the
/// checked-out branch and `+` for a branch checked out in another worktree.
static STALE_BRANCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<marker>[*+ ]) (?P<name>\S+)\s+[0-9a-f]+\s+(?:\([^)]*\)\s+)?\[[^\]]*: gone\]")
        .expect("stale branch pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleBranch {
    pub name: String,
    /// Checked out here or in another worktree; git refuses to delete it.
    pub checked_out: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBranch {
    pub remote: String,
    pub name: String,
}

impl RemoteBranch {
    pub fn qualified(&self) -> String {
        format!("{}/{}", self.remote, self.name)
    }
}

/// Parse `git branch -vv` output into branches whose upstream was deleted.
/// Lines that do not match are skipped.
pub fn parse_stale_branches(output: &str) -> Vec<StaleBranch> {
    output
        .lines()
        .filter_map(|line| {
            let Some(caps) = STALE_BRANCH.captures(line) else {
                if line.contains(UPSTREAM_GONE_MARKER) {
                    log::debug!("unrecognised branch -vv line skipped: {line:?}");
                }
                return None;
            };
            Some(StaleBranch {
                name: caps["name"].to_string(),
                checked_out: &caps["marker"] != " ",
            })
        })
        .collect()
}

/// Parse `git branch --format=%(refname:short)` output.
pub fn parse_branch_names(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| {
            // Detached HEAD shows up as "(HEAD detached at ...)"
            let keep = !line.is_empty() && !line.starts_with('(');
            if !keep && !line.is_empty() {
                log::debug!("branch name line skipped: {line:?}");
            }
            keep
        })
        .map(String::from)
        .collect()
}

/// Parse `git branch -r` output (with or without `--format=%(refname:short)`)
/// into remote/branch pairs. Symbolic refs and bare remote names are skipped.
pub fn parse_remote_branches(output: &str) -> Vec<RemoteBranch> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            if line.contains(SYMREF_ARROW) {
                return None;
            }
            let Some((remote, name)) = line.split_once('/') else {
                log::debug!("remote branch line without a remote skipped: {line:?}");
                return None;
            };
            if name == "HEAD" || name.is_empty() {
                return None;
            }
            Some(RemoteBranch {
                remote: remote.to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}

/// Remote branches with no local branch of the same name, one per name.
/// When several remotes carry a name, `preferred_remote` wins, else the first seen.
pub fn untracked_remote_branches(
    remote: Vec<RemoteBranch>,
    local: &[String],
    preferred_remote: &str,
) -> Vec<RemoteBranch> {
    let mut picked: Vec<RemoteBranch> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for branch in remote {
        if local.contains(&branch.name) {
            continue;
        }
        match index_by_name.get(&branch.name) {
            Some(&i) => {
                if branch.remote == preferred_remote {
                    picked[i] = branch;
                }
            }
            None => {
                index_by_name.insert(branch.name.clone(), picked.len());
                picked.push(branch);
            }
        }
    }

    picked
}
