mod cli;
mod logging;

use clap::{Parser, Subcommand};
use std::{path::PathBuf, process::ExitCode};
use toolshed_core::{Styles, config};

#[derive(Parser)]
#[command(
    version,
    about = "Interactive git branch manager, pip wrapper, folder tree printer and dummy PDF generator"
)]
struct Cli {
    /// Override path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output (NO_COLOR is honored as well)
    #[arg(long, global = true)]
    no_color: bool,

    /// Log level for the log file
    #[arg(
        long,
        global = true,
        env = "TOOLSHED_LOG",
        default_value = logging::DEFAULT_LOG_LEVEL,
        value_parser = logging::LOG_LEVELS,
        ignore_case = true
    )]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage branches and stashes of the current git repository
    Git,
    /// List and upgrade Python packages, refresh the requirements file
    Pip,
    /// Write the directory tree of a folder to a text file
    Tree {
        /// Deepest level to print; 0 lists only the immediate sub-directories
        #[arg(short, long)]
        depth: usize,
        /// Directory to render (default: current directory)
        #[arg(long)]
        root: Option<PathBuf>,
        /// File to write (default: [tree] output_file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate dummy PDF reports of exact sizes in MB
    Pdf {
        /// Target sizes, e.g. `1.2 3.4` or `1.2,3.4`; prompted for when omitted
        sizes: Vec<String>,
        /// Directory the PDFs are written to (default: current directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn color_enabled(cli: &Cli, config: &config::Config) -> bool {
    let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    config.output.color && !cli.no_color && !no_color_env
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::setup_logging(logging::parse_level(&cli.log_level)) {
        eprintln!("Warning: failed to set up logging: {e}");
    }

    let mut config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            let cli_error = cli::CliError::system(format!("{error:#}"));
            cli::print_error(&cli_error, &Styles::plain());
            return ExitCode::from(2);
        }
    };

    let colors = color_enabled(&cli, &config);
    // Listing commands honor the same switch as our own output
    config.git.color &= colors;
    let styles = Styles::from_config(&config.theme, colors);

    let result = match cli.command {
        Commands::Git => cli::cmd_git(&config, &styles),
        Commands::Pip => cli::cmd_pip(&config, &styles),
        Commands::Tree {
            depth,
            root,
            output,
        } => {
            let args = cli::TreeArgs {
                depth,
                root,
                output,
            };
            cli::cmd_tree(&config, &styles, &args)
        }
        Commands::Pdf { sizes, output_dir } => {
            let args = cli::PdfArgs { sizes, output_dir };
            cli::cmd_pdf(&styles, &args)
        }
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(error) => {
            log::error!("exiting with status {}: {}", error.code(), error.message());
            cli::print_error(&error, &styles);
            let code: u8 = match error.code() {
                1 => 1,
                _ => 2,
            };
            ExitCode::from(code)
        }
    }
}
