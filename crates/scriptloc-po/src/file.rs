//! Whole-catalog operations: I/O, header access, duplicate resolution.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::entry::{Entry, MessageKey, Translation};
use crate::parse::{PoError, parse_entries};
use crate::placeholder::PlaceholderMismatch;
use crate::write::{WriteOptions, write_entries};

/// A parsed message catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoFile {
    pub entries: Vec<Entry>,
}

/// Two entries share a key but carry different non-empty translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateConflict {
    pub key: MessageKey,
    pub first: String,
    pub second: String,
}

/// A format-flagged entry whose translation breaks placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatIssue {
    pub key: MessageKey,
    pub mismatch: PlaceholderMismatch,
}

impl PoFile {
    #[must_use]
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Parse catalog text.
    ///
    /// # Errors
    ///
    /// See [`parse_entries`].
    pub fn parse(input: &str) -> Result<Self, PoError> {
        parse_entries(input).map(Self::new)
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `PoError::Io` when the file cannot be read, or a parse error.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, PoError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Serialize and write the catalog.
    ///
    /// # Errors
    ///
    /// Returns `PoError::Io` when the file cannot be written.
    pub fn write(&self, path: impl AsRef<Path>, options: WriteOptions) -> Result<(), PoError> {
        let path = path.as_ref();
        std::fs::write(path, self.render(options)).map_err(|source| PoError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn render(&self, options: WriteOptions) -> String {
        write_entries(&self.entries, options)
    }

    #[must_use]
    pub fn header(&self) -> Option<&Entry> {
        self.entries.iter().find(|e| e.is_header())
    }

    /// `Key: Value` pairs of the header's `msgstr`, in order.
    #[must_use]
    pub fn header_fields(&self) -> Vec<(String, String)> {
        let Some(header) = self.header() else {
            return Vec::new();
        };
        let Translation::Singular(text) = &header.msgstr else {
            return Vec::new();
        };
        text.as_str()
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect()
    }

    /// The header's `Language:` field, if set and non-empty.
    #[must_use]
    pub fn language(&self) -> Option<String> {
        self.header_fields()
            .into_iter()
            .find(|(k, v)| k.eq_ignore_ascii_case("language") && !v.is_empty())
            .map(|(_, v)| v)
    }

    /// Non-header, non-obsolete entries.
    pub fn live(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.obsolete && !e.is_header())
    }

    /// Obsolete (`#~`) entries.
    pub fn obsolete(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.obsolete)
    }

    /// First live entry with `key`.
    #[must_use]
    pub fn find(&self, key: &MessageKey) -> Option<&Entry> {
        self.live().find(|e| &e.key() == key)
    }

    /// Keys that appear on more than one live entry with different non-empty
    /// translations.
    #[must_use]
    pub fn conflicts(&self) -> Vec<DuplicateConflict> {
        let mut seen: HashMap<MessageKey, &Entry> = HashMap::new();
        let mut conflicts = Vec::new();
        for entry in self.live() {
            let key = entry.key();
            match seen.get(&key) {
                Some(first) => {
                    if translations_conflict(first, entry) {
                        conflicts.push(DuplicateConflict {
                            key,
                            first: first.translated().unwrap_or_default().to_string(),
                            second: entry.translated().unwrap_or_default().to_string(),
                        });
                    }
                }
                None => {
                    seen.insert(key, entry);
                }
            }
        }
        conflicts
    }

    /// Merge live entries that share a key into the first occurrence.
    ///
    /// References and flags are unioned; a non-empty translation wins over
    /// an empty one.
    ///
    /// # Errors
    ///
    /// Returns `PoError::DuplicateKey` when two non-empty translations differ.
    pub fn unify(self) -> Result<Self, PoError> {
        let mut index: HashMap<MessageKey, usize> = HashMap::new();
        let mut entries: Vec<Entry> = Vec::with_capacity(self.entries.len());

        for entry in self.entries {
            if entry.obsolete || entry.is_header() {
                entries.push(entry);
                continue;
            }
            let key = entry.key();
            let Some(&at) = index.get(&key) else {
                index.insert(key, entries.len());
                entries.push(entry);
                continue;
            };
            let kept = &mut entries[at];
            if translations_conflict(kept, &entry) {
                return Err(PoError::DuplicateKey { key });
            }
            for reference in entry.references {
                if !kept.references.contains(&reference) {
                    kept.references.push(reference);
                }
            }
            for flag in &entry.flags {
                kept.add_flag(flag);
            }
            if kept.msgstr.is_empty() && !entry.msgstr.is_empty() {
                kept.msgstr = entry.msgstr;
            }
        }

        Ok(Self { entries })
    }

    /// Placeholder mismatches over all live, format-flagged entries.
    #[must_use]
    pub fn format_issues(&self) -> Vec<FormatIssue> {
        self.live()
            .filter_map(|e| {
                e.check_format().err().map(|mismatch| FormatIssue {
                    key: e.key(),
                    mismatch,
                })
            })
            .collect()
    }
}

fn translations_conflict(a: &Entry, b: &Entry) -> bool {
    !a.msgstr.is_empty() && !b.msgstr.is_empty() && a.msgstr != b.msgstr
}

impl fmt::Display for PoFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(WriteOptions::default()))
    }
}
