//! Directory-only tree rendering in the style of `tree -d`.

use crate::console::Console;
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_PREFIX: &str = "│   ";
const SPACE_PREFIX: &str = "    ";

/// Render the sub-directories of `root`. Children of the root are level 0 and
/// every level up to and including `depth` is shown.
pub fn render_tree(root: &Path, depth: usize) -> Result<String> {
    let mut out = String::new();
    let name = root
        .file_name()
        .map_or_else(|| root.display().to_string(), |n| n.to_string_lossy().into_owned());
    out.push_str(&name);
    out.push('\n');

    let children =
        subdirectories(root).with_context(|| format!("failed to read {}", root.display()))?;
    render_level(&children, depth, 0, "", &mut out);
    Ok(out)
}

fn render_level(dirs: &[PathBuf], depth: usize, level: usize, prefix: &str, out: &mut String) {
    for (i, dir) in dirs.iter().enumerate() {
        let last = i + 1 == dirs.len();
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        out.push_str(prefix);
        out.push_str(if last { LAST_BRANCH } else { BRANCH });
        out.push_str(&name);
        out.push('\n');

        if level < depth {
            let children = match subdirectories(dir) {
                Ok(children) => children,
                Err(err) => {
                    log::warn!("skipping unreadable directory {}: {err}", dir.display());
                    continue;
                }
            };
            let child_prefix = format!("{prefix}{}", if last { SPACE_PREFIX } else { PIPE_PREFIX });
            render_level(&children, depth, level + 1, &child_prefix, out);
        }
    }
}

/// Directories directly inside `dir`, hidden ones included, sorted by name.
fn subdirectories(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(dirs)
}

/// Render the tree of `root` and overwrite `output` with it.
pub fn write_tree(console: &mut Console, root: &Path, depth: usize, output: &Path) -> Result<()> {
    let rendered = render_tree(root, depth)?;
    fs::write(output, rendered).with_context(|| format!("failed to write {}", output.display()))?;
    log::info!("wrote tree of {} (depth {depth}) to {}", root.display(), output.display());
    console.success(&format!("Folder structure written to {}", output.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::scripted_console;

    fn layout() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        for dir in ["src/core", "src/cli/args", "docs", ".hidden", "Zeta"] {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        fs::write(root.join("README.md"), "readme").unwrap();
        fs::write(root.join("src/lib.rs"), "").unwrap();
        tmp
    }

    fn body(rendered: &str) -> String {
        rendered.split_once('\n').unwrap().1.to_string()
    }

    #[test]
    fn test_depth_zero_lists_immediate_directories() {
        let tmp = layout();
        let rendered = render_tree(tmp.path(), 0).unwrap();
        assert_eq!(
            body(&rendered),
            "├── .hidden\n├── Zeta\n├── docs\n└── src\n"
        );
    }

    #[test]
    fn test_nested_levels_and_prefixes() {
        let tmp = layout();
        let rendered = render_tree(tmp.path(), 2).unwrap();
        assert_eq!(
            body(&rendered),
            "\
├── .hidden
├── Zeta
├── docs
└── src
    ├── cli
    │   └── args
    └── core
"
        );
    }

    #[test]
    fn test_depth_limit_stops_descent() {
        let tmp = layout();
        let rendered = render_tree(tmp.path(), 1).unwrap();
        assert!(rendered.contains("    ├── cli\n"));
        assert!(!rendered.contains("args"));
    }

    #[test]
    fn test_first_line_is_root_name_and_files_are_ignored() {
        let tmp = layout();
        let rendered = render_tree(tmp.path(), 3).unwrap();
        let root_name = tmp.path().file_name().unwrap().to_string_lossy();
        assert_eq!(rendered.lines().next().unwrap(), root_name);
        assert!(!rendered.contains("README.md"));
        assert!(!rendered.contains("lib.rs"));
    }

    #[test]
    fn test_write_tree_overwrites_output() {
        let tmp = layout();
        let output = tmp.path().join("folder_structure.txt");
        fs::write(&output, "stale contents that are longer than the tree\n".repeat(20)).unwrap();
        let (mut console, out) = scripted_console("");

        write_tree(&mut console, tmp.path(), 0, &output).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(!written.contains("stale"));
        assert!(written.ends_with("└── src\n"));
        assert!(out.contents().contains("Folder structure written to"));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(render_tree(&tmp.path().join("nope"), 0).is_err());
    }
}
