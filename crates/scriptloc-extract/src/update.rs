//! Directory-level catalog refresh.
//!
//! For every `<prefix>*.lua` script in the scripts directory:
//!
//! 1. build its template and write `<locale_dir>/<stem>.<base>.po`;
//! 2. merge the template into every sibling `<stem>.<locale>.po`.
//!
//! Scripts without `_()` calls are skipped and a stale template is removed.
//! Extra base catalogs (maintained elsewhere) are merged into their siblings
//! the same way. Files are only rewritten when their content changes.

use std::fs;
use std::path::{Path, PathBuf};

use scriptloc_i18n::{sibling_catalogs, split_catalog_name};
use scriptloc_po::{PoFile, WriteOptions};

use crate::ExtractError;
use crate::merge::merge;
use crate::template::build_template;

/// Where to find scripts and catalogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOptions {
    pub scripts_dir: PathBuf,
    pub locale_dir: PathBuf,
    /// File name prefix of scenario scripts.
    pub script_prefix: String,
    /// Locale of the generated templates.
    pub base_locale: String,
    /// Base catalogs not generated from scripts.
    pub extra_bases: Vec<PathBuf>,
    pub write: WriteOptions,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            scripts_dir: PathBuf::from("scripts"),
            locale_dir: PathBuf::from("scripts/locale"),
            script_prefix: "scenario_".to_string(),
            base_locale: "en".to_string(),
            extra_bases: vec![
                PathBuf::from("resources/locale/main.en.po"),
                PathBuf::from("resources/locale/tutorial.en.po"),
            ],
            write: WriteOptions::default(),
        }
    }
}

/// What an update run touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Templates written (new or changed).
    pub templates: Vec<PathBuf>,
    /// Scripts without translatable strings.
    pub skipped: Vec<PathBuf>,
    /// Stale templates deleted.
    pub removed: Vec<PathBuf>,
    /// Language catalogs rewritten by a merge.
    pub merged: Vec<PathBuf>,
    /// Language catalogs already up to date.
    pub unchanged: Vec<PathBuf>,
    /// Extra base catalogs that do not exist.
    pub missing_bases: Vec<PathBuf>,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ExtractError + '_ {
    move |source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Scenario scripts in `options.scripts_dir`, sorted by path.
///
/// # Errors
///
/// Returns `ExtractError::Io` when the directory cannot be listed.
pub fn scenario_scripts(options: &UpdateOptions) -> Result<Vec<PathBuf>, ExtractError> {
    let dir = &options.scripts_dir;
    let mut scripts = Vec::new();
    for dirent in fs::read_dir(dir).map_err(io_error(dir))? {
        let path = dirent.map_err(io_error(dir))?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with(&options.script_prefix)
            && name.ends_with(".lua")
            && path.is_file()
        {
            scripts.push(path);
        }
    }
    scripts.sort();
    Ok(scripts)
}

/// Path written into `#:` references for `script`.
fn reference_label(script: &Path) -> String {
    script.to_string_lossy().replace('\\', "/")
}

/// Template path for `script`: `<locale_dir>/<stem>.<base>.po`.
#[must_use]
pub fn template_path(script: &Path, options: &UpdateOptions) -> PathBuf {
    let stem = script
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    options
        .locale_dir
        .join(format!("{stem}.{}.po", options.base_locale))
}

/// Write `text` to `path` unless it already holds exactly that.
fn write_if_changed(path: &Path, text: &str) -> Result<bool, ExtractError> {
    match fs::read_to_string(path) {
        Ok(current) if current == text => return Ok(false),
        Ok(_) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(io_error(path)(err)),
    }
    fs::write(path, text).map_err(io_error(path))?;
    Ok(true)
}

/// Refresh every scenario template and its translations, then the extra
/// bases.
///
/// # Errors
///
/// Stops at the first unreadable script, unparsable catalog or failed write.
pub fn update_scenarios(options: &UpdateOptions) -> Result<UpdateReport, ExtractError> {
    let mut report = UpdateReport::default();
    fs::create_dir_all(&options.locale_dir).map_err(io_error(&options.locale_dir))?;

    for script in scenario_scripts(options)? {
        update_scenario(&script, options, &mut report)?;
    }

    for base in &options.extra_bases {
        if base.is_file() {
            update_other_languages(base, options, &mut report)?;
        } else {
            tracing::warn!(path = %base.display(), "base catalog not found");
            report.missing_bases.push(base.clone());
        }
    }

    tracing::info!(
        templates = report.templates.len(),
        skipped = report.skipped.len(),
        merged = report.merged.len(),
        "update finished"
    );
    Ok(report)
}

/// Refresh one script's template and merge it into its siblings.
///
/// # Errors
///
/// See [`update_scenarios`].
pub fn update_scenario(
    script: &Path,
    options: &UpdateOptions,
    report: &mut UpdateReport,
) -> Result<(), ExtractError> {
    let _span = tracing::info_span!("scenario", script = %script.display()).entered();
    let source = fs::read_to_string(script).map_err(io_error(script))?;
    let template = build_template(&reference_label(script), &source).map_err(|source| {
        ExtractError::Script {
            path: script.to_path_buf(),
            source,
        }
    })?;
    let output = template_path(script, options);

    if template.is_empty() {
        tracing::info!("skipped, no translatable strings");
        report.skipped.push(script.to_path_buf());
        if output.is_file() {
            fs::remove_file(&output).map_err(io_error(&output))?;
            report.removed.push(output);
        }
        return Ok(());
    }

    tracing::debug!(
        entries = template.file.entries.len(),
        calls = template.extracted,
        "built template"
    );
    if write_if_changed(&output, &template.file.render(options.write))? {
        tracing::info!(path = %output.display(), "wrote template");
        report.templates.push(output.clone());
    }
    update_other_languages(&output, options, report)
}

/// Merge the base catalog `base` (`<stem>.<base_locale>.po`) into every
/// sibling `<stem>.<locale>.po` in the same directory.
///
/// # Errors
///
/// Returns `ExtractError::NotABase` when `base` is not named for
/// `options.base_locale`, or the first read/parse/write failure.
pub fn update_other_languages(
    base: &Path,
    options: &UpdateOptions,
    report: &mut UpdateReport,
) -> Result<(), ExtractError> {
    let (stem, locale) = split_catalog_name(base).ok_or_else(|| ExtractError::NotABase {
        path: base.to_path_buf(),
    })?;
    if locale != options.base_locale {
        return Err(ExtractError::NotABase {
            path: base.to_path_buf(),
        });
    }
    let template = PoFile::read(base)?;
    let dir = base
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    for (other_locale, path) in sibling_catalogs(dir, &stem)? {
        if other_locale == options.base_locale {
            continue;
        }
        let text = fs::read_to_string(&path).map_err(io_error(&path))?;
        let existing = PoFile::parse(&text)?;
        let outcome = merge(&template, &existing);
        let merged = outcome.file.render(options.write);
        if merged == text {
            tracing::debug!(path = %path.display(), "catalog up to date");
            report.unchanged.push(path);
            continue;
        }
        fs::write(&path, merged).map_err(io_error(&path))?;
        tracing::info!(
            from = %base.display(),
            to = %path.display(),
            added = outcome.stats.added,
            obsoleted = outcome.stats.obsoleted,
            "merged catalog"
        );
        report.merged.push(path);
    }
    Ok(())
}
