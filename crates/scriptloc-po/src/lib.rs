#![forbid(unsafe_code)]

//! gettext message catalogs for scenario scripts.
//!
//! # Role in scriptloc
//! `scriptloc-po` owns the on-disk format. It parses `.po` text into
//! [`Entry`] values without losing the authored segment layout, writes
//! catalogs back out, and understands the `string.format` placeholders that
//! format-flagged entries must preserve.
//!
//! # How it fits in the system
//! The extractor (`scriptloc-extract`) builds and merges [`PoFile`]s; the
//! runtime catalog (`scriptloc-i18n`) loads them for lookup.

pub mod entry;
pub mod escape;
pub mod file;
pub mod parse;
pub mod placeholder;
pub mod write;

pub use entry::{Entry, FUZZY, MessageKey, PoString, Reference, Translation, is_format_flag};
pub use file::{DuplicateConflict, FormatIssue, PoFile};
pub use parse::{PoError, parse_entries};
pub use placeholder::{Placeholder, PlaceholderMismatch, check_placeholders, placeholders};
pub use write::{DEFAULT_WIDTH, WriteOptions};
