//! `scriptloc.toml` configuration.
//!
//! Resolution order for the file: `--config`, then `SCRIPTLOC_CONFIG`, then
//! `./scriptloc.toml`. An explicitly named file must exist; the default one
//! may be absent, in which case every key takes its default. Command-line
//! flags override file values.

use std::path::{Path, PathBuf};

use scriptloc_extract::UpdateOptions;
use scriptloc_po::WriteOptions;
use serde::Deserialize;

use crate::CliError;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "SCRIPTLOC_CONFIG";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "scriptloc.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scripts_dir: PathBuf,
    pub locale_dir: PathBuf,
    pub script_glob_prefix: String,
    pub base_locale: String,
    pub extra_bases: Vec<PathBuf>,
    pub wrap_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        let update = UpdateOptions::default();
        Self {
            scripts_dir: update.scripts_dir,
            locale_dir: update.locale_dir,
            script_glob_prefix: update.script_prefix,
            base_locale: update.base_locale,
            extra_bases: update.extra_bases,
            wrap_width: update.write.width,
        }
    }
}

impl Config {
    /// Parse configuration text. `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` on malformed TOML or unknown keys.
    pub fn parse(text: &str, path: &Path) -> Result<Self, CliError> {
        toml::from_str(text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Load using the resolution order described in the module docs.
    ///
    /// # Errors
    ///
    /// Fails when an explicitly named file is missing or invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load_from(explicit, from_env.as_deref(), Path::new(DEFAULT_CONFIG_FILE))
    }

    /// [`load`](Self::load) with the environment value and default path
    /// supplied by the caller.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_from(
        explicit: Option<&Path>,
        from_env: Option<&Path>,
        default_path: &Path,
    ) -> Result<Self, CliError> {
        let (path, required) = match explicit.or(from_env) {
            Some(path) => (path, true),
            None => (default_path, false),
        };
        match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Self::parse(&text, path)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                Ok(Self::default())
            }
            Err(source) => Err(CliError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    #[must_use]
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            width: self.wrap_width,
        }
    }

    #[must_use]
    pub fn update_options(&self) -> UpdateOptions {
        UpdateOptions {
            scripts_dir: self.scripts_dir.clone(),
            locale_dir: self.locale_dir.clone(),
            script_prefix: self.script_glob_prefix.clone(),
            base_locale: self.base_locale.clone(),
            extra_bases: self.extra_bases.clone(),
            write: self.write_options(),
        }
    }
}
