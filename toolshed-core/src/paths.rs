use crate::constants::APP_NAME;
use std::path::PathBuf;

/// Resolve `~` and `~/...` against the home directory; other paths pass through.
/// `None` only when a tilde path is given and there is no home directory.
pub fn expand_tilde(path: &str) -> Option<PathBuf> {
    match path.strip_prefix('~') {
        Some("") => dirs::home_dir(),
        Some(rest) if rest.starts_with('/') => {
            dirs::home_dir().map(|home| home.join(rest.trim_start_matches('/')))
        }
        _ => Some(PathBuf::from(path)),
    }
}

/// `$var/toolshed` when `var` is set and non-empty, else `fallback/toolshed`.
#[cfg(unix)]
fn xdg_app_dir(var: &str, fallback: Option<PathBuf>) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or(fallback)
        .map(|base| base.join(APP_NAME))
}

/// Directory holding `config.toml`. Uses `~/.config` on macOS too.
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(unix)]
    {
        xdg_app_dir(
            "XDG_CONFIG_HOME",
            dirs::home_dir().map(|home| home.join(".config")),
        )
    }
    #[cfg(windows)]
    {
        dirs::config_dir().map(|base| base.join(APP_NAME))
    }
}

/// Directory for the log file; falls back to the temp dir without a home.
pub fn cache_dir() -> PathBuf {
    #[cfg(unix)]
    let dir = xdg_app_dir(
        "XDG_CACHE_HOME",
        dirs::home_dir().map(|home| home.join(".cache")),
    );
    #[cfg(windows)]
    let dir = dirs::cache_dir().map(|base| base.join(APP_NAME));
    dir.unwrap_or_else(|| std::env::temp_dir().join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_pass_through() {
        for path in ["requirements.txt", "reqs/prod.txt", "/srv/app/requirements.txt"] {
            assert_eq!(expand_tilde(path), Some(PathBuf::from(path)));
        }
    }

    #[test]
    fn home_relative_path_is_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(
            expand_tilde("~/projects/requirements.txt"),
            Some(home.join("projects/requirements.txt"))
        );
        assert_eq!(expand_tilde("~"), Some(home));
    }

    #[test]
    fn other_users_and_inner_tildes_are_literal() {
        assert_eq!(expand_tilde("~bob/x"), Some(PathBuf::from("~bob/x")));
        assert_eq!(expand_tilde("out/~/tree.txt"), Some(PathBuf::from("out/~/tree.txt")));
    }

    #[test]
    fn cache_dir_is_namespaced() {
        assert_eq!(cache_dir().file_name().unwrap(), APP_NAME);
    }
}
