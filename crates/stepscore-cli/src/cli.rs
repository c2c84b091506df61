use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "stepscore CLI - Replay recorded transport steps, write the step table and score energy deposited in the scoring volume.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a step trace through the stepping action and write the step table.
    Replay(ReplayArgs),
}

/// Arguments for the `replay` subcommand.
#[derive(Args, Debug, Default)]
pub struct ReplayArgs {
    /// Path to a run configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the detector description (TOML). Overrides the config file.
    #[arg(short, long, value_name = "PATH")]
    pub detector: Option<PathBuf>,

    /// Path to the step trace (CSV). Overrides the config file.
    #[arg(short, long, value_name = "PATH")]
    pub trace: Option<PathBuf>,

    /// Path of the step table to write (CSV). Overrides the config file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Name of the step table. Overrides the config file.
    #[arg(long, value_name = "NAME")]
    pub table_name: Option<String>,

    /// Do not draw a progress bar.
    #[arg(long)]
    pub no_progress: bool,
}
