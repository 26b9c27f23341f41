#![forbid(unsafe_code)]

//! The `scriptloc` command-line tool.

use std::path::PathBuf;

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

pub use cli::{Cli, Command};
pub use commands::{Outcome, run};
pub use config::Config;
pub use logging::LogFormat;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
    #[error("{}: cannot tell the catalog's locale", path.display())]
    UnknownLocale { path: PathBuf },
    #[error(transparent)]
    Catalog(#[from] scriptloc_po::PoError),
    #[error(transparent)]
    I18n(#[from] scriptloc_i18n::I18nError),
    #[error(transparent)]
    Extract(#[from] scriptloc_extract::ExtractError),
    #[error("cannot write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("cannot encode report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging setup failed: {0}")]
    Logging(String),
}
