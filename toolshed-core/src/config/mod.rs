pub mod theme;

use crate::{
    constants::{
        CONFIG_FILE_NAME, DEFAULT_PYTHON, DEFAULT_REMOTE, DEFAULT_REQUIREMENTS_FILE,
        DEFAULT_TREE_OUTPUT_FILE,
    },
    paths::{config_dir, expand_tilde},
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub use theme::{NamedColor, ThemeColor, ThemeConfig};

fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Terminal output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Colors used for status lines and menu titles.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Settings for `toolshed git`.
    #[serde(default)]
    pub git: GitConfig,

    /// Settings for `toolshed pip`.
    #[serde(default)]
    pub pip: PipConfig,

    /// Settings for `toolshed tree`.
    #[serde(default)]
    pub tree: TreeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Emit ANSI colors (default: true). `NO_COLOR` in the environment also disables them.
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct GitConfig {
    /// Remote preferred when creating tracking branches (default: "origin").
    #[serde(default = "GitConfig::default_remote")]
    pub remote: String,
    /// Pass `--color=always` to listing commands (default: true).
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: Self::default_remote(),
            color: true,
        }
    }
}

impl GitConfig {
    fn default_remote() -> String {
        DEFAULT_REMOTE.to_string()
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct PipConfig {
    /// Python interpreter used as `<python> -m pip`.
    #[serde(default = "PipConfig::default_python")]
    pub python: String,
    /// File overwritten by "Update requirements file". Supports `~`.
    #[serde(default = "PipConfig::default_requirements_file")]
    pub requirements_file: String,
}

impl Default for PipConfig {
    fn default() -> Self {
        Self {
            python: Self::default_python(),
            requirements_file: Self::default_requirements_file(),
        }
    }
}

impl PipConfig {
    fn default_python() -> String {
        DEFAULT_PYTHON.to_string()
    }

    fn default_requirements_file() -> String {
        DEFAULT_REQUIREMENTS_FILE.to_string()
    }

    pub fn resolved_requirements_file(&self) -> PathBuf {
        expand_tilde(&self.requirements_file)
            .unwrap_or_else(|| PathBuf::from(&self.requirements_file))
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct TreeConfig {
    /// File the folder structure is written to (default: "folder_structure.txt").
    #[serde(default = "TreeConfig::default_output_file")]
    pub output_file: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            output_file: Self::default_output_file(),
        }
    }
}

impl TreeConfig {
    fn default_output_file() -> String {
        DEFAULT_TREE_OUTPUT_FILE.to_string()
    }
}

fn default_true() -> bool {
    true
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    Ok(config)
}

/// Load the config file. An explicit override must exist; the default location is optional.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let config_file = match config_override {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path.to_path_buf()
        }
        None => match config_file() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("no config file found, using defaults");
                return Ok(Config::default());
            }
        },
    };
    let contents = fs::read_to_string(&config_file)
        .with_context(|| format!("failed to read {}", config_file.display()))?;
    let config = load_config_from_str(&contents)
        .with_context(|| format!("invalid config file {}", config_file.display()))?;
    log::info!("loaded config from {}", config_file.display());
    Ok(config)
}
