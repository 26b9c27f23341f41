//! Catalog entry model.
//!
//! # Invariants
//!
//! 1. **Segments are authoritative when present**: a [`PoString`] parsed from
//!    a file keeps its quoted segments verbatim, so writing it back is
//!    byte-identical. Its logical value is derived from those segments.
//! 2. **Keys are opaque**: an entry is identified by its [`MessageKey`]
//!    (context plus logical `msgid`). Nothing inspects the text itself.

use std::fmt;

use crate::escape::{escape, unescape};
use crate::placeholder::{PlaceholderMismatch, check_placeholders};

/// A quoted catalog string: one or more segments that concatenate.
#[derive(Debug, Clone, Default)]
pub struct PoString {
    value: String,
    segments: Option<Vec<String>>,
}

impl PoString {
    /// Create a string from its logical value. The writer chooses the
    /// segment layout.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            segments: None,
        }
    }

    /// Create a string from escaped segments as they appear between quotes.
    #[must_use]
    pub fn from_segments(segments: Vec<String>) -> Self {
        let value = segments.iter().map(|s| unescape(s)).collect();
        Self {
            value,
            segments: Some(segments),
        }
    }

    /// The logical (unescaped, concatenated) value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Authored segments, if this string came from a file.
    #[must_use]
    pub fn segments(&self) -> Option<&[String]> {
        self.segments.as_deref()
    }

    /// Escaped form of the whole value in a single segment.
    #[must_use]
    pub fn escaped(&self) -> String {
        escape(&self.value)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl PartialEq for PoString {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for PoString {}

impl From<&str> for PoString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PoString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// A `#:` source reference: a script path with an optional line number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference {
    pub path: String,
    pub line: Option<u32>,
}

impl Reference {
    pub fn new(path: impl Into<String>, line: Option<u32>) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }

    /// Parse a single whitespace-free token such as `scripts/x.lua:42`.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.rsplit_once(':') {
            Some((path, line)) if !path.is_empty() => match line.parse() {
                Ok(n) => Self::new(path, Some(n)),
                Err(_) => Self::new(token, None),
            },
            _ => Self::new(token, None),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}", self.path),
            None => f.write_str(&self.path),
        }
    }
}

/// Lookup key of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey {
    pub context: Option<String>,
    pub id: String,
}

impl MessageKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            context: None,
            id: id.into(),
        }
    }

    pub fn with_context(context: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            id: id.into(),
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(ctx) => write!(f, "{ctx:?} / {:?}", self.id),
            None => write!(f, "{:?}", self.id),
        }
    }
}

/// The `msgstr` side of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// `msgstr "..."`
    Singular(PoString),
    /// `msgstr[0] "..."`, `msgstr[1] "..."`, ...
    Plural(Vec<PoString>),
}

impl Default for Translation {
    fn default() -> Self {
        Self::Singular(PoString::default())
    }
}

impl Translation {
    /// Every translated form in index order.
    #[must_use]
    pub fn forms(&self) -> Vec<&PoString> {
        match self {
            Self::Singular(s) => vec![s],
            Self::Plural(forms) => forms.iter().collect(),
        }
    }

    /// Whether no translated form has any text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms().iter().all(|s| s.is_empty())
    }

    /// The form at `index`, if present and non-empty.
    #[must_use]
    pub fn form(&self, index: usize) -> Option<&str> {
        let s = match self {
            Self::Singular(s) if index == 0 => s,
            Self::Singular(_) => return None,
            Self::Plural(forms) => forms.get(index)?,
        };
        (!s.is_empty()).then(|| s.as_str())
    }
}

/// Flag marking a translation that needs review; never used at runtime.
pub const FUZZY: &str = "fuzzy";

/// One catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// `# ` comments, without the leading `# `.
    pub translator_comments: Vec<String>,
    /// `#.` comments.
    pub extracted_comments: Vec<String>,
    /// `#:` locations, in order.
    pub references: Vec<Reference>,
    /// `#,` flags, in order.
    pub flags: Vec<String>,
    /// `#|` lines, verbatim after the marker.
    pub previous: Vec<String>,
    pub context: Option<PoString>,
    pub msgid: PoString,
    pub msgid_plural: Option<PoString>,
    pub msgstr: Translation,
    /// Written with a `#~` prefix and ignored for lookup.
    pub obsolete: bool,
}

impl Entry {
    /// A fresh untranslated entry.
    pub fn new(msgid: impl Into<String>) -> Self {
        Self {
            msgid: PoString::new(msgid),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(PoString::new(context));
        self
    }

    #[must_use]
    pub fn with_msgstr(mut self, msgstr: impl Into<String>) -> Self {
        self.msgstr = Translation::Singular(PoString::new(msgstr));
        self
    }

    #[must_use]
    pub fn key(&self) -> MessageKey {
        MessageKey {
            context: self.context.as_ref().map(|c| c.as_str().to_string()),
            id: self.msgid.as_str().to_string(),
        }
    }

    /// The catalog header is the live entry with an empty id and no context.
    #[must_use]
    pub fn is_header(&self) -> bool {
        !self.obsolete && self.context.is_none() && self.msgid.is_empty()
    }

    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Add a flag unless already present.
    pub fn add_flag(&mut self, flag: &str) {
        if !self.has_flag(flag) {
            self.flags.push(flag.to_string());
        }
    }

    pub fn remove_flag(&mut self, flag: &str) {
        self.flags.retain(|f| f != flag);
    }

    #[must_use]
    pub fn is_fuzzy(&self) -> bool {
        self.has_flag(FUZZY)
    }

    /// The positive `*-format` flag, e.g. `lua-format`.
    #[must_use]
    pub fn format_flag(&self) -> Option<&str> {
        self.flags
            .iter()
            .map(String::as_str)
            .find(|f| is_format_flag(f))
    }

    /// Singular translation, if non-empty.
    #[must_use]
    pub fn translated(&self) -> Option<&str> {
        self.msgstr.form(0)
    }

    /// Check every translated form of a format-flagged entry against its
    /// source. Unflagged entries always pass.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlaceholderMismatch`] found.
    pub fn check_format(&self) -> Result<(), PlaceholderMismatch> {
        if self.format_flag().is_none() {
            return Ok(());
        }
        match &self.msgstr {
            Translation::Singular(s) => check_placeholders(self.msgid.as_str(), s.as_str()),
            Translation::Plural(forms) => {
                let plural = self.msgid_plural.as_ref().unwrap_or(&self.msgid);
                for (index, form) in forms.iter().enumerate() {
                    let source = if index == 0 { &self.msgid } else { plural };
                    check_placeholders(source.as_str(), form.as_str())?;
                }
                Ok(())
            }
        }
    }
}

/// Whether `flag` asserts a format language (`lua-format`, `c-format`, ...).
#[must_use]
pub fn is_format_flag(flag: &str) -> bool {
    flag.ends_with("-format") && !flag.starts_with("no-") && flag.len() > "-format".len()
}
