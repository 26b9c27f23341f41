#![forbid(unsafe_code)]

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use scriptloc_cli::{Cli, CliError, Config, Outcome, logging, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match execute(cli) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Findings(count)) => {
            tracing::warn!(count, "findings reported");
            ExitCode::from(1)
        }
        Err(err) => {
            let _ = writeln!(std::io::stderr(), "scriptloc: {err}");
            ExitCode::from(2)
        }
    }
}

fn execute(cli: Cli) -> Result<Outcome, CliError> {
    logging::init(cli.log_format, cli.verbose)?;
    let config = Config::load(cli.config.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = run(cli.command, &config, &mut out)?;
    out.flush()?;
    Ok(outcome)
}
