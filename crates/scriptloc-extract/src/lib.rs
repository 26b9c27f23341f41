#![forbid(unsafe_code)]

//! Authoring-side tooling for scenario catalogs.
//!
//! Scans Lua scenario scripts for `_()` calls and header metadata, builds a
//! template catalog per script, and merges templates into the sibling
//! language catalogs.

use std::path::PathBuf;

pub mod header;
pub mod lua;
pub mod merge;
pub mod template;
pub mod update;

pub use header::ScenarioHeader;
pub use lua::{Extracted, LexError, extract_calls};
pub use merge::{MergeOutcome, MergeStats, merge};
pub use template::{LUA_FORMAT, Template, build_template};
pub use update::{UpdateOptions, UpdateReport, update_other_languages, update_scenarios};

/// Errors from extraction and catalog updates.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] scriptloc_po::PoError),
    #[error("{}: {source}", path.display())]
    Script {
        path: PathBuf,
        #[source]
        source: LexError,
    },
    #[error("{}: not a `<name>.<locale>.po` base catalog", path.display())]
    NotABase { path: PathBuf },
}
