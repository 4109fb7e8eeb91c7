pub const APP_NAME: &str = "toolshed";

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Token that cancels any selection prompt (compared case-insensitively).
pub const CANCEL_TOKEN: &str = "c";

pub const RULE_WIDTH: usize = 30;

pub const GIT_PROGRAM: &str = "git";

pub const DEFAULT_REMOTE: &str = "origin";

/// Marker git prints in `git branch -vv` when the upstream branch was deleted.
pub const UPSTREAM_GONE_MARKER: &str = ": gone]";

/// Separator git uses for symbolic refs such as `origin/HEAD -> origin/main`.
pub const SYMREF_ARROW: &str = "->";

pub const NO_LOCAL_CHANGES: &str = "No local changes to save";

pub const DEFAULT_REQUIREMENTS_FILE: &str = "requirements.txt";

pub const DEFAULT_TREE_OUTPUT_FILE: &str = "folder_structure.txt";

#[cfg(windows)]
pub const DEFAULT_PYTHON: &str = "python";
#[cfg(not(windows))]
pub const DEFAULT_PYTHON: &str = "python3";
