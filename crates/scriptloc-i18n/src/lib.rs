#![forbid(unsafe_code)]

//! Runtime side of scenario localization.
//!
//! Provides key-based lookup with locale fallback chains, identity fallback
//! for untranslated text, gettext plural form selection, and positional
//! `string.format` substitution.

pub mod catalog;
pub mod format;
pub mod load;
pub mod plural;

pub use catalog::{
    CoverageReport, I18nError, LocaleCoverage, LocaleStrings, StringCatalog, StringEntry,
    validate_locale,
};
pub use format::{FormatArg, format_template};
pub use load::{catalog_locale, load_catalogs, sibling_catalogs, split_catalog_name};
pub use plural::PluralRule;
