pub mod actions;

pub use actions::{PipAction, run_pip_manager};

use crate::process::CommandLine;
use anyhow::{Context, Result};
use serde::Deserialize;

/// One entry of `pip list --outdated --format=json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutdatedPackage {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub latest_version: String,
}

impl OutdatedPackage {
    /// `name version -> latest`, or just the name when pip omitted versions.
    pub fn summary(&self) -> String {
        if self.version.is_empty() || self.latest_version.is_empty() {
            self.name.clone()
        } else {
            format!("{} {} -> {}", self.name, self.version, self.latest_version)
        }
    }
}

pub fn parse_outdated(json: &str) -> Result<Vec<OutdatedPackage>> {
    // pip prints nothing at all on some versions when every package is current
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(json).context("unexpected output from pip list --format=json")
}

/// Builds `<python> -m pip ...` invocations.
#[derive(Debug, Clone)]
pub struct Pip {
    python: String,
}

impl Pip {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    fn pip(&self) -> CommandLine {
        CommandLine::new(&self.python).args(["-m", "pip"])
    }

    pub fn list(&self) -> CommandLine {
        self.pip().arg("list")
    }

    pub fn list_outdated(&self) -> CommandLine {
        self.pip().args(["list", "--outdated", "--format=columns"])
    }

    pub fn list_outdated_json(&self) -> CommandLine {
        self.pip().args(["list", "--outdated", "--format=json"])
    }

    pub fn upgrade(&self, package: &str) -> CommandLine {
        self.pip().args(["install", "--upgrade", package])
    }

    pub fn freeze(&self) -> CommandLine {
        self.pip().arg("freeze")
    }
}
