use std::{io, path::PathBuf};
use toolshed_core::{
    Console, InputClosed, Session, Styles, SystemRunner, UserError,
    config::Config,
    git::run_git_manager,
    paths::expand_tilde,
    pdf::run_pdf,
    pip::run_pip_manager,
    tree::write_tree,
};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Clone)]
pub struct CliError {
    message: String,
    code: i32,
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 1,
        }
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 2,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> i32 {
        self.code
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(value: anyhow::Error) -> Self {
        if value.downcast_ref::<UserError>().is_some() || value.downcast_ref::<InputClosed>().is_some()
        {
            Self::user(value.to_string())
        } else {
            Self::system(format!("{value:#}"))
        }
    }
}

#[derive(Debug, Clone)]
pub struct TreeArgs {
    pub depth: usize,
    pub root: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct PdfArgs {
    pub sizes: Vec<String>,
    pub output_dir: Option<PathBuf>,
}

/// Diagnostics go to stderr so they never mix with tool output.
pub fn print_error(error: &CliError, styles: &Styles) {
    let mut console = Console::new(
        Box::new(io::empty()),
        Box::new(io::stderr()),
        styles.clone(),
    );
    console.error(error.message());
}

pub fn cmd_git(config: &Config, styles: &Styles) -> CliResult<()> {
    let runner = SystemRunner::new();
    let mut session = Session::new(Console::stdio(styles.clone()), &runner);
    run_git_manager(&mut session, &config.git)?;
    Ok(())
}

pub fn cmd_pip(config: &Config, styles: &Styles) -> CliResult<()> {
    let runner = SystemRunner::new();
    let mut session = Session::new(Console::stdio(styles.clone()), &runner);
    run_pip_manager(&mut session, &config.pip)?;
    Ok(())
}

fn current_dir() -> CliResult<PathBuf> {
    std::env::current_dir()
        .map_err(|e| CliError::system(format!("failed to read current directory: {e}")))
}

pub fn cmd_tree(config: &Config, styles: &Styles, args: &TreeArgs) -> CliResult<()> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => current_dir()?,
    };
    if !root.is_dir() {
        return Err(CliError::user(format!(
            "{} is not a directory",
            root.display()
        )));
    }
    // "." and ".." have no base name until resolved
    let root = dunce::canonicalize(&root).unwrap_or(root);

    let output = match &args.output {
        Some(output) => output.clone(),
        None => expand_tilde(&config.tree.output_file)
            .unwrap_or_else(|| PathBuf::from(&config.tree.output_file)),
    };

    let mut console = Console::stdio(styles.clone());
    write_tree(&mut console, &root, args.depth, &output)?;
    Ok(())
}

pub fn cmd_pdf(styles: &Styles, args: &PdfArgs) -> CliResult<()> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    if !output_dir.is_dir() {
        return Err(CliError::user(format!(
            "{} is not a directory",
            output_dir.display()
        )));
    }

    let mut console = Console::stdio(styles.clone());
    run_pdf(&mut console, &args.sizes, &output_dir)?;
    Ok(())
}
