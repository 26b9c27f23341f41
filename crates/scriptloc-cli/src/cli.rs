//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::logging::LogFormat;

/// Maintain and query scenario translation catalogs.
#[derive(Parser, Debug)]
#[command(name = "scriptloc", version)]
pub struct Cli {
    /// Configuration file (default: $SCRIPTLOC_CONFIG, then ./scriptloc.toml).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum, value_name = "FORMAT", default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
    /// More logging; repeat for trace output.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Regenerate scenario templates and merge them into every language.
    Update(UpdateArgs),
    /// Report duplicate-key conflicts and placeholder mismatches.
    Check(CheckArgs),
    /// Translate one string through a catalog.
    Lookup(LookupArgs),
    /// Show how much of each catalog is translated.
    Coverage(CoverageArgs),
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Directory holding `scenario_*.lua` scripts.
    #[arg(long, value_name = "DIR")]
    pub scripts: Option<PathBuf>,
    /// Directory receiving the generated catalogs.
    #[arg(long, value_name = "DIR")]
    pub locale_dir: Option<PathBuf>,
    /// Extra base catalogs to merge into their siblings. Replaces the
    /// configured list when given.
    #[arg(long, value_name = "FILE")]
    pub also: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    /// Source text (`msgid`).
    #[arg(value_name = "TEXT")]
    pub text: String,
    #[arg(long, value_name = "CONTEXT")]
    pub context: Option<String>,
    /// Positional format argument; repeat in placeholder order.
    #[arg(long = "arg", value_name = "VALUE", allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CoverageArgs {
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
    /// Emit a JSON report.
    #[arg(long)]
    pub json: bool,
}
