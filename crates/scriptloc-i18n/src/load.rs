//! Loading per-language catalogs from disk.
//!
//! Scenario catalogs live side by side as `<stem>.<locale>.po`, e.g.
//! `scenario_55_shangrila.en.po` and `scenario_55_shangrila.ca.po`.

use std::path::{Path, PathBuf};

use scriptloc_po::{PoError, PoFile};

use crate::catalog::{I18nError, StringCatalog, validate_locale};

/// Split `<stem>.<locale>.po` into `(stem, locale)`.
#[must_use]
pub fn split_catalog_name(path: &Path) -> Option<(String, String)> {
    let name = path.file_name()?.to_str()?;
    let base = name.strip_suffix(".po")?;
    let (stem, locale) = base.rsplit_once('.')?;
    if stem.is_empty() || validate_locale(locale).is_err() {
        return None;
    }
    Some((stem.to_string(), locale.to_string()))
}

/// Locale of a catalog: the header's `Language:` field, else the file name.
#[must_use]
pub fn catalog_locale(path: &Path, file: &PoFile) -> Option<String> {
    file.language()
        .or_else(|| split_catalog_name(path).map(|(_, locale)| locale))
}

/// All `<stem>.*.po` files in `dir`, sorted by path.
///
/// # Errors
///
/// Returns `PoError::Io` when the directory cannot be listed.
pub fn sibling_catalogs(dir: &Path, stem: &str) -> Result<Vec<(String, PathBuf)>, PoError> {
    let io_err = |source| PoError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut found = Vec::new();
    for dirent in std::fs::read_dir(dir).map_err(io_err)? {
        let path = dirent.map_err(io_err)?.path();
        if let Some((file_stem, locale)) = split_catalog_name(&path) {
            if file_stem == stem {
                found.push((locale, path));
            }
        }
    }
    found.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(found)
}

/// Load every `<stem>.<locale>.po` in `dir` into one catalog whose fallback
/// chain is `[base_locale]`.
///
/// # Errors
///
/// Fails on unreadable files, parse errors, or conflicting duplicates.
pub fn load_catalogs(dir: &Path, stem: &str, base_locale: &str) -> Result<StringCatalog, I18nError> {
    validate_locale(base_locale)?;
    let mut catalog = StringCatalog::new();
    for (locale, path) in sibling_catalogs(dir, stem)? {
        let file = PoFile::read(&path)?;
        tracing::debug!(path = %path.display(), %locale, "loading catalog");
        catalog.add_po(locale, &file)?;
    }
    catalog.set_fallback_chain(vec![base_locale.to_string()]);
    Ok(catalog)
}
