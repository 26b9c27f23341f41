//! String catalog with locale fallback and identity fallback.
//!
//! # Invariants
//!
//! 1. **Fallback chain terminates**: every lookup walks the chain exactly
//!    once; when no locale provides the key the source text itself is
//!    returned.
//!
//! 2. **One translation per key**: a locale holds at most one string per
//!    [`MessageKey`]. Loading a catalog whose duplicates disagree fails with
//!    [`I18nError::DuplicateKey`] instead of picking one.
//!
//! 3. **Untranslated is absent**: empty and fuzzy `msgstr` values are never
//!    stored, so they fall through to the next locale.
//!
//! 4. **Thread safety**: `StringCatalog` is `Send + Sync` (all data is
//!    immutable after construction).
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Key not in any locale | Source text returned |
//! | Missing locale | Locale not loaded | Falls through chain |
//! | Bad format arg | Placeholder without usable arg | Placeholder left as-is |
//! | Empty catalog | No locales loaded | Every lookup is the identity |

use std::collections::HashMap;

use scriptloc_po::{MessageKey, PoError, PoFile, Translation};

use crate::format::{FormatArg, format_template};
use crate::plural::PluralRule;

/// Locale identifier (e.g., `"en"`, `"ca"`, `"pt-BR"`).
pub type Locale = String;

/// Errors from building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    /// A locale string was malformed.
    #[error("invalid locale: {0}")]
    InvalidLocale(String),
    /// A catalog file could not be read or parsed.
    #[error("catalog error: {0}")]
    Catalog(#[from] PoError),
    /// Two different translations for the same key in one locale.
    #[error("duplicate key {key} in locale '{locale}'")]
    DuplicateKey { locale: String, key: MessageKey },
}

/// A translated string: simple, or one string per plural form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringEntry {
    Simple(String),
    Plural(Vec<String>),
}

impl StringEntry {
    /// The singular text; an empty form counts as untranslated.
    fn singular(&self) -> Option<&str> {
        match self {
            Self::Simple(s) => Some(s.as_str()),
            Self::Plural(forms) => forms.first().map(String::as_str),
        }
        .filter(|s| !s.is_empty())
    }

    /// The form `rule` selects for `count`; an empty form counts as
    /// untranslated.
    fn plural(&self, rule: PluralRule, count: u64) -> Option<&str> {
        match self {
            Self::Simple(s) => Some(s.as_str()),
            Self::Plural(forms) => forms
                .get(rule.index(count))
                .or_else(|| forms.last())
                .map(String::as_str),
        }
        .filter(|s| !s.is_empty())
    }
}

/// Strings for a single locale.
#[derive(Debug, Clone, Default)]
pub struct LocaleStrings {
    strings: HashMap<MessageKey, StringEntry>,
}

impl LocaleStrings {
    /// Create an empty locale string set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a parsed catalog.
    ///
    /// Live entries with a non-empty, non-fuzzy translation are kept; the
    /// header and obsolete entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::DuplicateKey`] when duplicate entries disagree.
    pub fn from_po(locale: &str, file: &PoFile) -> Result<Self, I18nError> {
        let mut strings = Self::new();
        let mut skipped = 0usize;
        for entry in file.live() {
            if entry.is_fuzzy() || entry.msgstr.is_empty() {
                skipped += 1;
                continue;
            }
            let value = match &entry.msgstr {
                Translation::Singular(s) => StringEntry::Simple(s.as_str().to_string()),
                Translation::Plural(forms) => {
                    StringEntry::Plural(forms.iter().map(|f| f.as_str().to_string()).collect())
                }
            };
            strings.try_insert_entry(locale, entry.key(), value)?;
        }
        tracing::debug!(
            locale,
            translated = strings.len(),
            skipped,
            "loaded locale strings"
        );
        Ok(strings)
    }

    /// Insert a simple string without context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings
            .insert(MessageKey::new(key), StringEntry::Simple(value.into()));
    }

    /// Insert a simple string under `context`.
    pub fn insert_with_context(
        &mut self,
        context: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.strings.insert(
            MessageKey::with_context(context, key),
            StringEntry::Simple(value.into()),
        );
    }

    /// Insert plural forms in `msgstr[N]` order.
    pub fn insert_plural(&mut self, key: impl Into<String>, forms: Vec<String>) {
        self.strings
            .insert(MessageKey::new(key), StringEntry::Plural(forms));
    }

    /// Insert unless a different value is already stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::DuplicateKey`] on a conflicting value.
    pub fn try_insert_entry(
        &mut self,
        locale: &str,
        key: MessageKey,
        value: StringEntry,
    ) -> Result<(), I18nError> {
        match self.strings.get(&key) {
            Some(existing) if *existing != value => Err(I18nError::DuplicateKey {
                locale: locale.to_string(),
                key,
            }),
            Some(_) => Ok(()),
            None => {
                self.strings.insert(key, value);
                Ok(())
            }
        }
    }

    /// Look up a string entry by key.
    #[must_use]
    pub fn get(&self, key: &MessageKey) -> Option<&StringEntry> {
        self.strings.get(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the locale has no strings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over all keys in this locale.
    pub fn keys(&self) -> impl Iterator<Item = &MessageKey> {
        self.strings.keys()
    }
}

/// Central string catalog with locale fallback.
///
/// # Example
///
/// ```
/// use scriptloc_i18n::{FormatArg, LocaleStrings, StringCatalog};
///
/// let mut catalog = StringCatalog::new();
///
/// let mut ca = LocaleStrings::new();
/// ca.insert("Back", "Enrere");
/// ca.insert("%d ships remaining", "Queden %d naus");
/// catalog.add_locale("ca", ca).unwrap();
///
/// assert_eq!(catalog.translate("ca", "Back"), "Enrere");
/// assert_eq!(catalog.translate("ca", "Report status"), "Report status");
/// assert_eq!(
///     catalog.format("ca", "%d ships remaining", &[FormatArg::Int(4)]),
///     "Queden 4 naus"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct StringCatalog {
    locales: HashMap<Locale, LocaleStrings>,
    fallback_chain: Vec<Locale>,
    plural_rules: HashMap<Locale, PluralRule>,
}

impl Default for StringCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that a locale tag is non-empty and made of `[A-Za-z0-9_@.-]`.
///
/// # Errors
///
/// Returns [`I18nError::InvalidLocale`] otherwise.
pub fn validate_locale(locale: &str) -> Result<(), I18nError> {
    let valid = !locale.is_empty()
        && locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '@' | '.'));
    if valid {
        Ok(())
    } else {
        Err(I18nError::InvalidLocale(locale.to_string()))
    }
}

impl StringCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locales: HashMap::new(),
            fallback_chain: Vec::new(),
            plural_rules: HashMap::new(),
        }
    }

    /// Add strings for a locale, replacing any previous set.
    ///
    /// Automatically detects the plural rule based on the locale tag.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::InvalidLocale`] for a malformed tag.
    pub fn add_locale(
        &mut self,
        locale: impl Into<String>,
        strings: LocaleStrings,
    ) -> Result<(), I18nError> {
        let locale = locale.into();
        validate_locale(&locale)?;
        let rule = PluralRule::for_locale(&locale);
        self.plural_rules.entry(locale.clone()).or_insert(rule);
        self.locales.insert(locale, strings);
        Ok(())
    }

    /// Load a parsed catalog as `locale`.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed tag or conflicting duplicates.
    pub fn add_po(&mut self, locale: impl Into<String>, file: &PoFile) -> Result<(), I18nError> {
        let locale = locale.into();
        validate_locale(&locale)?;
        let strings = LocaleStrings::from_po(&locale, file)?;
        self.add_locale(locale, strings)
    }

    /// Set the fallback chain (tried in order when a key is missing).
    ///
    /// Example: `["pt-BR", "pt", "en"]`.
    pub fn set_fallback_chain(&mut self, chain: Vec<Locale>) {
        self.fallback_chain = chain;
    }

    /// Override the plural rule for a locale.
    pub fn set_plural_rule(&mut self, locale: impl Into<String>, rule: PluralRule) {
        self.plural_rules.insert(locale.into(), rule);
    }

    /// Locales to try for `locale`: itself, then the chain without repeats.
    fn chain<'a>(&'a self, locale: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        std::iter::once(locale).chain(
            self.fallback_chain
                .iter()
                .map(String::as_str)
                .filter(move |l| *l != locale),
        )
    }

    /// Look up a translation by key.
    ///
    /// Tries the specified locale first, then walks the fallback chain.
    /// Returns `None` if no locale provides the key.
    #[must_use]
    pub fn get(&self, locale: &str, key: &MessageKey) -> Option<&str> {
        self.chain(locale).find_map(|l| {
            self.locales
                .get(l)
                .and_then(|ls| ls.get(key))
                .and_then(StringEntry::singular)
        })
    }

    /// Translate `text`, falling back to `text` itself.
    #[must_use]
    pub fn translate<'a>(&'a self, locale: &str, text: &'a str) -> &'a str {
        self.get(locale, &MessageKey::new(text)).unwrap_or(text)
    }

    /// Translate `text` under `context`, falling back to `text` itself.
    #[must_use]
    pub fn translate_with_context<'a>(
        &'a self,
        locale: &str,
        context: &str,
        text: &'a str,
    ) -> &'a str {
        self.get(locale, &MessageKey::with_context(context, text))
            .unwrap_or(text)
    }

    /// Look up the plural form of `key` for `count`.
    ///
    /// Uses each locale's plural rule to select the form. A simple entry
    /// serves every count.
    #[must_use]
    pub fn get_plural(&self, locale: &str, key: &MessageKey, count: u64) -> Option<&str> {
        self.chain(locale).find_map(|l| {
            let entry = self.locales.get(l)?.get(key)?;
            let rule = self
                .plural_rules
                .get(l)
                .copied()
                .unwrap_or(PluralRule::English);
            entry.plural(rule, count)
        })
    }

    /// Translate a singular/plural pair, falling back to the source pair
    /// with the English rule.
    #[must_use]
    pub fn translate_plural<'a>(
        &'a self,
        locale: &str,
        singular: &'a str,
        plural: &'a str,
        count: u64,
    ) -> &'a str {
        self.get_plural(locale, &MessageKey::new(singular), count)
            .unwrap_or(if count == 1 { singular } else { plural })
    }

    /// Translate `text` and substitute positional arguments.
    #[must_use]
    pub fn format(&self, locale: &str, text: &str, args: &[FormatArg]) -> String {
        format_template(self.translate(locale, text), args)
    }

    /// [`format`](Self::format) with a context.
    #[must_use]
    pub fn format_with_context(
        &self,
        locale: &str,
        context: &str,
        text: &str,
        args: &[FormatArg],
    ) -> String {
        format_template(self.translate_with_context(locale, context, text), args)
    }

    /// All registered locale tags.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        self.locales.keys().map(String::as_str).collect()
    }

    // -----------------------------------------------------------------
    // Coverage
    // -----------------------------------------------------------------

    /// Collect all unique keys across every registered locale.
    ///
    /// The result is sorted for deterministic output.
    #[must_use]
    pub fn all_keys(&self) -> Vec<MessageKey> {
        let mut keys: Vec<MessageKey> = self
            .locales
            .values()
            .flat_map(|ls| ls.keys().cloned())
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Find keys from `reference_keys` that are missing in `locale`
    /// (including fallback chain resolution).
    ///
    /// Returns the missing keys sorted.
    #[must_use]
    pub fn missing_keys(&self, locale: &str, reference_keys: &[MessageKey]) -> Vec<MessageKey> {
        let mut missing: Vec<MessageKey> = reference_keys
            .iter()
            .filter(|key| self.get(locale, key).is_none())
            .cloned()
            .collect();
        missing.sort_unstable();
        missing
    }

    /// Coverage of every locale against `all_keys()`.
    #[must_use]
    pub fn coverage_report(&self) -> CoverageReport {
        let all = self.all_keys();
        self.coverage_against(&all)
    }

    /// Coverage of every locale against an explicit reference set, usually
    /// the keys of the template catalog.
    #[must_use]
    pub fn coverage_against(&self, reference_keys: &[MessageKey]) -> CoverageReport {
        let total = reference_keys.len();

        let mut locale_tags: Vec<String> = self.locales.keys().cloned().collect();
        locale_tags.sort_unstable();

        let locales = locale_tags
            .into_iter()
            .map(|tag| {
                let missing = self.missing_keys(&tag, reference_keys);
                let present = total.saturating_sub(missing.len());
                let coverage_percent = if total == 0 {
                    100.0
                } else {
                    (present as f32 / total as f32) * 100.0
                };
                LocaleCoverage {
                    locale: tag,
                    present,
                    missing,
                    coverage_percent,
                }
            })
            .collect();

        CoverageReport {
            total_keys: total,
            locales,
        }
    }
}

/// Coverage report for a string catalog.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    /// Size of the reference key set.
    pub total_keys: usize,
    /// Per-locale coverage data.
    pub locales: Vec<LocaleCoverage>,
}

/// Per-locale coverage statistics.
#[derive(Debug, Clone)]
pub struct LocaleCoverage {
    /// Locale tag (e.g., `"ca"`).
    pub locale: String,
    /// Number of reference keys present (including via fallback).
    pub present: usize,
    /// Keys from the reference set that are missing (even after fallback).
    pub missing: Vec<MessageKey>,
    /// Coverage as a percentage (0.0–100.0).
    pub coverage_percent: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalan_catalog() -> StringCatalog {
        let mut catalog = StringCatalog::new();
        let mut en = LocaleStrings::new();
        en.insert("Back", "Back");
        en.insert("Report status", "Report status");
        catalog.add_locale("en", en).unwrap();

        let mut ca = LocaleStrings::new();
        ca.insert("Back", "Enrere");
        ca.insert("The %s fleet has taken control of Shangri-La.", "La flota %s ha pres el control de Shangri-La.");
        ca.insert_with_context("faction", "Human Navy", "Armada Humana");
        ca.insert_plural("%d ship", vec!["%d nau".into(), "%d naus".into()]);
        catalog.add_locale("ca", ca).unwrap();
        catalog.set_fallback_chain(vec!["en".into()]);
        catalog
    }

    #[test]
    fn known_key_translates() {
        let catalog = catalan_catalog();
        assert_eq!(catalog.translate("ca", "Back"), "Enrere");
    }

    #[test]
    fn unknown_key_is_identity() {
        let catalog = catalan_catalog();
        assert_eq!(catalog.translate("ca", "Dock to resupply"), "Dock to resupply");
        assert_eq!(StringCatalog::new().translate("ca", "Back"), "Back");
    }

    #[test]
    fn missing_locale_falls_back() {
        let catalog = catalan_catalog();
        assert_eq!(catalog.translate("fr", "Report status"), "Report status");
        assert_eq!(catalog.get("fr", &MessageKey::new("Back")), Some("Back"));
    }

    #[test]
    fn fallback_chain_order() {
        let mut catalog = StringCatalog::new();

        let mut en = LocaleStrings::new();
        en.insert("Back", "Back");
        en.insert("Shields", "Shields");

        let mut pt = LocaleStrings::new();
        pt.insert("Back", "Voltar");

        let mut pt_br = LocaleStrings::new();
        pt_br.insert("Back", "Volta");

        catalog.add_locale("en", en).unwrap();
        catalog.add_locale("pt", pt).unwrap();
        catalog.add_locale("pt-BR", pt_br).unwrap();
        catalog.set_fallback_chain(vec!["pt-BR".into(), "pt".into(), "en".into()]);

        assert_eq!(catalog.translate("pt-BR", "Back"), "Volta");
        assert_eq!(catalog.translate("pt-BR", "Shields"), "Shields");
    }

    #[test]
    fn context_is_part_of_key() {
        let catalog = catalan_catalog();
        assert_eq!(
            catalog.translate_with_context("ca", "faction", "Human Navy"),
            "Armada Humana"
        );
        assert_eq!(catalog.translate("ca", "Human Navy"), "Human Navy");
    }

    #[test]
    fn format_translated_and_fallback() {
        let catalog = catalan_catalog();
        assert_eq!(
            catalog.format(
                "ca",
                "The %s fleet has taken control of Shangri-La.",
                &["Kraylor".into()]
            ),
            "La flota Kraylor ha pres el control de Shangri-La."
        );
        assert_eq!(
            catalog.format("ca", "Hull: %d%%", &[FormatArg::Int(75)]),
            "Hull: 75%"
        );
    }

    #[test]
    fn plural_selection() {
        let catalog = catalan_catalog();
        assert_eq!(catalog.translate_plural("ca", "%d ship", "%d ships", 1), "%d nau");
        assert_eq!(catalog.translate_plural("ca", "%d ship", "%d ships", 3), "%d naus");
        assert_eq!(catalog.translate_plural("de", "%d station", "%d stations", 1), "%d station");
        assert_eq!(catalog.translate_plural("de", "%d station", "%d stations", 2), "%d stations");
    }

    #[test]
    fn plural_lookup_of_simple_entry() {
        let catalog = catalan_catalog();
        assert_eq!(catalog.get_plural("ca", &MessageKey::new("Back"), 5), Some("Enrere"));
    }

    #[test]
    fn invalid_locale_rejected() {
        let mut catalog = StringCatalog::new();
        let err = catalog.add_locale("", LocaleStrings::new()).unwrap_err();
        assert!(matches!(err, I18nError::InvalidLocale(_)));
        assert!(catalog.add_locale("ca es", LocaleStrings::new()).is_err());
        assert!(catalog.add_locale("sr@latin", LocaleStrings::new()).is_ok());
    }

    #[test]
    fn try_insert_rejects_divergent_values() {
        let mut ls = LocaleStrings::new();
        let key = MessageKey::new("Back");
        ls.try_insert_entry("ca", key.clone(), StringEntry::Simple("Enrere".into()))
            .unwrap();
        ls.try_insert_entry("ca", key.clone(), StringEntry::Simple("Enrere".into()))
            .unwrap();
        let err = ls
            .try_insert_entry("ca", key, StringEntry::Simple("Tornar".into()))
            .unwrap_err();
        assert!(matches!(err, I18nError::DuplicateKey { .. }));
        assert_eq!(ls.len(), 1);
    }

    #[test]
    fn from_po_skips_untranslated_and_fuzzy() {
        let text = "\
msgid \"\"
msgstr \"Language: ca\\n\"

msgid \"Back\"
msgstr \"Enrere\"

#, fuzzy
msgid \"Report status\"
msgstr \"Informe\"

msgid \"Exuari\"
msgstr \"\"

#~ msgid \"Old line\"
#~ msgstr \"Línia antiga\"
";
        let file = PoFile::parse(text).unwrap();
        let ls = LocaleStrings::from_po("ca", &file).unwrap();
        assert_eq!(ls.len(), 1);
        assert!(ls.get(&MessageKey::new("Back")).is_some());
        assert!(ls.get(&MessageKey::new("")).is_none());
        assert!(ls.get(&MessageKey::new("Old line")).is_none());
    }

    #[test]
    fn from_po_rejects_conflicting_duplicates() {
        let text = "msgid \"Back\"\nmsgstr \"Enrere\"\n\nmsgid \"Back\"\nmsgstr \"Tornar\"\n";
        let file = PoFile::parse(text).unwrap();
        let err = LocaleStrings::from_po("ca", &file).unwrap_err();
        assert!(matches!(err, I18nError::DuplicateKey { ref locale, .. } if locale == "ca"));
    }

    #[test]
    fn from_po_accepts_agreeing_duplicates() {
        let text = "msgid \"Back\"\nmsgstr \"Enrere\"\n\nmsgid \"Back\"\nmsgstr \"\"\n\nmsgid \"Back\"\nmsgstr \"Enrere\"\n";
        let file = PoFile::parse(text).unwrap();
        let ls = LocaleStrings::from_po("ca", &file).unwrap();
        assert_eq!(ls.len(), 1);
    }

    #[test]
    fn empty_plural_form_falls_back() {
        let text = "\
msgid \"%d ship\"
msgid_plural \"%d ships\"
msgstr[0] \"\"
msgstr[1] \"%d naus\"
";
        let mut catalog = StringCatalog::new();
        catalog.add_po("ca", &PoFile::parse(text).unwrap()).unwrap();
        let mut en = LocaleStrings::new();
        en.insert_plural("%d ship", vec!["%d vessel".into(), "%d vessels".into()]);
        catalog.add_locale("en", en).unwrap();

        assert_eq!(catalog.translate("ca", "%d ship"), "%d ship");
        assert_eq!(catalog.translate_plural("ca", "%d ship", "%d ships", 1), "%d ship");
        assert_eq!(catalog.translate_plural("ca", "%d ship", "%d ships", 3), "%d naus");

        catalog.set_fallback_chain(vec!["en".into()]);
        assert_eq!(catalog.translate("ca", "%d ship"), "%d vessel");
        assert_eq!(catalog.get_plural("ca", &MessageKey::new("%d ship"), 1), Some("%d vessel"));
    }

    #[test]
    fn empty_catalog() {
        let catalog = StringCatalog::new();
        assert_eq!(catalog.get("en", &MessageKey::new("anything")), None);
        assert_eq!(catalog.get_plural("en", &MessageKey::new("anything"), 1), None);
        assert!(catalog.locales().is_empty());
    }

    // -----------------------------------------------------------------
    // Coverage tests
    // -----------------------------------------------------------------

    fn keys(ids: &[&str]) -> Vec<MessageKey> {
        ids.iter().map(|id| MessageKey::new(*id)).collect()
    }

    #[test]
    fn all_keys_is_sorted_and_deduped() {
        let mut catalog = StringCatalog::new();
        let mut en = LocaleStrings::new();
        en.insert("b", "B");
        en.insert("a", "A");
        let mut ca = LocaleStrings::new();
        ca.insert("a", "A-ca");
        catalog.add_locale("en", en).unwrap();
        catalog.add_locale("ca", ca).unwrap();
        assert_eq!(catalog.all_keys(), keys(&["a", "b"]));
    }

    #[test]
    fn coverage_without_fallback() {
        let mut catalog = StringCatalog::new();
        let mut ca = LocaleStrings::new();
        ca.insert("Back", "Enrere");
        catalog.add_locale("ca", ca).unwrap();

        let reference = keys(&["Back", "Exuari", "Kraylor"]);
        let report = catalog.coverage_against(&reference);
        assert_eq!(report.total_keys, 3);
        let ca_cov = &report.locales[0];
        assert_eq!(ca_cov.present, 1);
        assert_eq!(ca_cov.missing, keys(&["Exuari", "Kraylor"]));
        assert!((ca_cov.coverage_percent - 33.333_332).abs() < 0.01);
    }

    #[test]
    fn coverage_with_fallback_is_complete() {
        let catalog = catalan_catalog();
        let report = catalog.coverage_against(&keys(&["Back", "Report status"]));
        for lc in &report.locales {
            assert!(lc.missing.is_empty(), "{} should resolve via fallback", lc.locale);
        }
    }

    #[test]
    fn coverage_report_empty_catalog() {
        let report = StringCatalog::new().coverage_report();
        assert_eq!(report.total_keys, 0);
        assert!(report.locales.is_empty());
    }

    #[test]
    fn catalog_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StringCatalog>();
    }
}
