use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "odh-lint")]
#[command(author, version, about = "Upgrade readiness diagnostics for Open Data Hub clusters")]
#[command(long_about = "Runs pluggable diagnostic checks against a cluster snapshot and reports \
    what blocks or complicates an upgrade.\n\n\
    Exit codes:\n  \
    0 - No blocking conditions\n  \
    1 - Blocking conditions found or checks failed to execute\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress report output on stdout
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run checks against a cluster snapshot
    Run(RunArgs),

    /// List registered checks
    List(ListArgs),
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Cluster snapshot (`kubectl get ... -o json|yaml` list document)
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Check selection pattern: `*`, a group shortcut, a check ID or a glob (repeatable)
    #[arg(long = "checks", value_name = "PATTERN")]
    pub checks: Vec<String>,

    /// Only run checks of this group
    #[arg(short, long)]
    pub group: Option<String>,

    /// Version the cluster is upgrading to
    #[arg(long)]
    pub target_version: Option<String>,

    /// Version the cluster runs now (detected from the snapshot when omitted)
    #[arg(long)]
    pub current_version: Option<String>,

    /// Output format [possible values: text, json, yaml]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop starting new checks after this many seconds (0 disables)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only list checks matching this pattern (repeatable)
    #[arg(long = "checks", value_name = "PATTERN")]
    pub checks: Vec<String>,

    /// Only list checks of this group
    #[arg(short, long)]
    pub group: Option<String>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
