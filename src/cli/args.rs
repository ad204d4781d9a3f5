//! Command-line argument definitions

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::cli::commands::analyze::AnalyzeArgs;
use crate::cli::commands::validate::ValidateArgs;

/// Tolerance chain stack-up analysis
#[derive(Parser, Debug)]
#[command(name = "tolchain", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format (auto: text on a terminal, YAML when piped)
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run worst-case, RSS and optional Monte Carlo analysis on a contributor table
    Analyze(AnalyzeArgs),

    /// Check a contributor table without analysing it
    Validate(ValidateArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Auto,
    Text,
    Yaml,
    Json,
}
