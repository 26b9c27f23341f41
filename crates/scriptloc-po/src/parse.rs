//! Line-oriented catalog parser.
//!
//! # Invariants
//!
//! 1. **Lossless strings**: quoted segments are kept exactly as authored, in
//!    order, so `msgid`/`msgstr` content survives a parse/write cycle
//!    byte for byte.
//! 2. **One pass**: every input line is visited exactly once; entries are
//!    emitted in file order.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unterminated string | Missing closing `"` | `PoError::UnterminatedString` |
//! | Stray continuation | `"..."` before any keyword | `PoError::UnexpectedContinuation` |
//! | Bad plural index | `msgstr[N]` out of sequence | `PoError::InvalidPluralIndex` |
//! | Missing msgid/msgstr | Incomplete entry | `PoError::MissingMsgid` / `MissingMsgstr` |
//! | Unknown keyword | Anything else | `PoError::UnexpectedLine` |

use std::path::PathBuf;

use crate::entry::{Entry, MessageKey, PoString, Reference, Translation};

/// Errors from reading, parsing, or writing catalogs.
#[derive(Debug, thiserror::Error)]
pub enum PoError {
    #[error("line {line}: unterminated string")]
    UnterminatedString { line: usize },
    #[error("line {line}: string continuation without a keyword")]
    UnexpectedContinuation { line: usize },
    #[error("line {line}: expected a quoted string after `{keyword}`")]
    MissingString { line: usize, keyword: String },
    #[error("line {line}: invalid plural index in `{text}`")]
    InvalidPluralIndex { line: usize, text: String },
    #[error("line {line}: entry has no msgid")]
    MissingMsgid { line: usize },
    #[error("line {line}: entry has no msgstr")]
    MissingMsgstr { line: usize },
    #[error("line {line}: unrecognized line `{text}`")]
    UnexpectedLine { line: usize, text: String },
    #[error("duplicate key {key} with conflicting translations")]
    DuplicateKey { key: MessageKey },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Context,
    Id,
    IdPlural,
    Str,
    StrN(usize),
}

#[derive(Default)]
struct Builder {
    entry: Entry,
    /// First line of the entry, for error reporting.
    start: usize,
    has_msgid: bool,
    has_msgstr: bool,
    /// Any comment or keyword seen.
    touched: bool,
    field: Option<(Field, Vec<String>)>,
    plural_forms: Vec<PoString>,
}

impl Builder {
    fn touch(&mut self, line: usize) {
        if !self.touched {
            self.touched = true;
            self.start = line;
        }
    }

    fn flush_field(&mut self) {
        let Some((field, segments)) = self.field.take() else {
            return;
        };
        let value = PoString::from_segments(segments);
        match field {
            Field::Context => self.entry.context = Some(value),
            Field::Id => self.entry.msgid = value,
            Field::IdPlural => self.entry.msgid_plural = Some(value),
            Field::Str => self.entry.msgstr = Translation::Singular(value),
            Field::StrN(_) => self.plural_forms.push(value),
        }
    }

    fn finish(&mut self) -> Result<Option<Entry>, PoError> {
        self.flush_field();
        if !self.touched {
            return Ok(None);
        }
        if !self.has_msgid {
            return Err(PoError::MissingMsgid { line: self.start });
        }
        if !self.has_msgstr {
            return Err(PoError::MissingMsgstr { line: self.start });
        }
        let mut done = std::mem::take(self);
        if !done.plural_forms.is_empty() {
            done.entry.msgstr = Translation::Plural(done.plural_forms);
        }
        Ok(Some(done.entry))
    }
}

/// Parse catalog text into entries, in file order.
///
/// Duplicate keys are kept as authored; see
/// [`PoFile::unify`](crate::PoFile::unify) for enforcing uniqueness.
///
/// # Errors
///
/// Returns a [`PoError`] carrying the 1-based line number of the first
/// malformed line.
pub fn parse_entries(input: &str) -> Result<Vec<Entry>, PoError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut entries = Vec::new();
    let mut builder = Builder::default();

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim_end_matches('\r').trim();

        if line.is_empty() {
            if let Some(entry) = builder.finish()? {
                entries.push(entry);
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("#~") {
            let rest = rest.trim_start();
            if rest.is_empty() {
                continue;
            }
            if let Some(previous) = rest.strip_prefix('|') {
                builder.touch(line_no);
                builder.entry.previous.push(strip_one_space(previous).to_string());
                continue;
            }
            parse_keyword_line(&mut builder, &mut entries, rest, line_no, true)?;
            continue;
        }

        if let Some(rest) = line.strip_prefix('#') {
            // A comment after a complete entry starts the next one.
            if builder.has_msgid {
                if let Some(entry) = builder.finish()? {
                    entries.push(entry);
                }
            }
            builder.touch(line_no);
            parse_comment(&mut builder.entry, rest);
            continue;
        }

        parse_keyword_line(&mut builder, &mut entries, line, line_no, false)?;
    }

    if let Some(entry) = builder.finish()? {
        entries.push(entry);
    }
    Ok(entries)
}

fn strip_one_space(s: &str) -> &str {
    s.strip_prefix(' ').unwrap_or(s)
}

fn parse_comment(entry: &mut Entry, rest: &str) {
    if let Some(refs) = rest.strip_prefix(':') {
        entry
            .references
            .extend(refs.split_whitespace().map(Reference::parse));
    } else if let Some(flags) = rest.strip_prefix(',') {
        for flag in flags.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            entry.add_flag(flag);
        }
    } else if let Some(text) = rest.strip_prefix('.') {
        entry.extracted_comments.push(strip_one_space(text).to_string());
    } else if let Some(text) = rest.strip_prefix('|') {
        entry.previous.push(strip_one_space(text).to_string());
    } else {
        entry.translator_comments.push(strip_one_space(rest).to_string());
    }
}

fn parse_keyword_line(
    builder: &mut Builder,
    entries: &mut Vec<Entry>,
    line: &str,
    line_no: usize,
    obsolete: bool,
) -> Result<(), PoError> {
    if line.starts_with('"') {
        let segment = parse_quoted(line, line_no)?;
        return match builder.field.as_mut() {
            Some((_, segments)) => {
                segments.push(segment);
                Ok(())
            }
            None => Err(PoError::UnexpectedContinuation { line: line_no }),
        };
    }

    let (keyword, rest) = line
        .split_once(|c: char| c.is_whitespace())
        .unwrap_or((line, ""));
    let field = match keyword {
        "msgctxt" => Field::Context,
        "msgid" => Field::Id,
        "msgid_plural" => Field::IdPlural,
        "msgstr" => Field::Str,
        kw if kw.starts_with("msgstr[") => Field::StrN(parse_plural_index(kw, line_no)?),
        _ => {
            return Err(PoError::UnexpectedLine {
                line: line_no,
                text: line.to_string(),
            });
        }
    };

    // A new entry started without a blank line.
    let starts_entry = matches!(field, Field::Context | Field::Id);
    if builder.has_msgid && (starts_entry || builder.entry.obsolete != obsolete) {
        if let Some(entry) = builder.finish()? {
            entries.push(entry);
        }
    }
    if obsolete {
        builder.entry.obsolete = true;
    }

    let rest = rest.trim();
    if !rest.starts_with('"') {
        return Err(PoError::MissingString {
            line: line_no,
            keyword: keyword.to_string(),
        });
    }
    let segment = parse_quoted(rest, line_no)?;

    builder.flush_field();
    builder.touch(line_no);
    match field {
        Field::Id => builder.has_msgid = true,
        Field::Str => builder.has_msgstr = true,
        Field::StrN(n) => {
            if n != builder.plural_forms.len() {
                return Err(PoError::InvalidPluralIndex {
                    line: line_no,
                    text: keyword.to_string(),
                });
            }
            builder.has_msgstr = true;
        }
        Field::Context | Field::IdPlural => {}
    }
    builder.field = Some((field, vec![segment]));
    Ok(())
}

fn parse_plural_index(keyword: &str, line_no: usize) -> Result<usize, PoError> {
    keyword
        .strip_prefix("msgstr[")
        .and_then(|s| s.strip_suffix(']'))
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| PoError::InvalidPluralIndex {
            line: line_no,
            text: keyword.to_string(),
        })
}

/// Extract the escaped content of a `"..."` token that must end the line.
fn parse_quoted(text: &str, line_no: usize) -> Result<String, PoError> {
    let body = text
        .strip_prefix('"')
        .ok_or(PoError::UnterminatedString { line: line_no })?;
    let mut escaped = false;
    for (i, ch) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => {
                let trailing = body[i + 1..].trim();
                if !trailing.is_empty() {
                    return Err(PoError::UnexpectedLine {
                        line: line_no,
                        text: text.to_string(),
                    });
                }
                return Ok(body[..i].to_string());
            }
            _ => {}
        }
    }
    Err(PoError::UnterminatedString { line: line_no })
}
