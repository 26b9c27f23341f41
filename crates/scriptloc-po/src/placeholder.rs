//! Positional format placeholders (`string.format` syntax).
//!
//! # Grammar
//!
//! `%[flags][width][.precision]conversion` where flags are drawn from
//! `-+ #0` (at most five), width and precision are at most two digits, and
//! the conversion is one of `d i u c x X o e E f g G q s a A`. `%%` is a
//! literal percent sign and is not a placeholder.
//!
//! A `%` that does not start a valid placeholder is plain text. This matches
//! how the game renders such strings: `string.format` would raise on them,
//! and the extractor never flags them as format strings.
//!
//! # Invariants
//!
//! 1. Placeholders are reported in source order with byte offsets into the
//!    scanned text.
//! 2. Translation checks compare conversions only; flags, width and
//!    precision may legitimately differ between languages.

use std::fmt;

/// Conversions accepted after `%`.
pub const CONVERSIONS: &[char] = &[
    'd', 'i', 'u', 'c', 'x', 'X', 'o', 'e', 'E', 'f', 'g', 'G', 'q', 's', 'a', 'A',
];

const FLAGS: &[char] = &['-', '+', ' ', '#', '0'];

/// One placeholder found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte offset of the leading `%`.
    pub offset: usize,
    /// Byte length including the `%` and the conversion.
    pub len: usize,
    /// Flag characters in the order written.
    pub flags: String,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub conversion: char,
}

impl Placeholder {
    /// The placeholder exactly as written in `text`.
    #[must_use]
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.offset..self.offset + self.len]
    }

    #[must_use]
    pub fn left_align(&self) -> bool {
        self.flags.contains('-')
    }

    #[must_use]
    pub fn zero_pad(&self) -> bool {
        self.flags.contains('0')
    }

    #[must_use]
    pub fn plus_sign(&self) -> bool {
        self.flags.contains('+')
    }
}

/// A run of template text: literal text or a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, with `%%` already collapsed to `%`.
    Text(String),
    Placeholder(Placeholder),
}

/// Scan `text` for placeholders, in order.
#[must_use]
pub fn placeholders(text: &str) -> Vec<Placeholder> {
    segments(text)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Placeholder(p) => Some(p),
            Segment::Text(_) => None,
        })
        .collect()
}

/// Whether `text` contains at least one placeholder.
#[must_use]
pub fn has_placeholders(text: &str) -> bool {
    !placeholders(text).is_empty()
}

/// Split `text` into literal runs and placeholders.
#[must_use]
pub fn segments(text: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while let Some(ch) = text[i..].chars().next() {
        if ch == '%' {
            if text[i + 1..].starts_with('%') {
                literal.push('%');
                i += 2;
                continue;
            }
            if let Some(placeholder) = parse_at(text, i) {
                if !literal.is_empty() {
                    out.push(Segment::Text(std::mem::take(&mut literal)));
                }
                i += placeholder.len;
                out.push(Segment::Placeholder(placeholder));
                continue;
            }
        }
        literal.push(ch);
        i += ch.len_utf8();
    }

    if !literal.is_empty() {
        out.push(Segment::Text(literal));
    }
    out
}

fn parse_at(text: &str, offset: usize) -> Option<Placeholder> {
    let bytes = text.as_bytes();
    let mut i = offset + 1;

    let mut flags = String::new();
    while let Some(&b) = bytes.get(i) {
        let ch = char::from(b);
        if FLAGS.contains(&ch) && flags.len() < 5 {
            flags.push(ch);
            i += 1;
        } else {
            break;
        }
    }

    let width = read_digits(bytes, &mut i)?;
    let precision = if bytes.get(i) == Some(&b'.') {
        i += 1;
        Some(read_digits(bytes, &mut i)?.unwrap_or(0))
    } else {
        None
    };

    let conversion = char::from(*bytes.get(i)?);
    if !CONVERSIONS.contains(&conversion) {
        return None;
    }

    Some(Placeholder {
        offset,
        len: i + 1 - offset,
        flags,
        width,
        precision,
        conversion,
    })
}

/// Up to two digits. Three or more digits make the placeholder invalid.
fn read_digits(bytes: &[u8], i: &mut usize) -> Option<Option<usize>> {
    let start = *i;
    while bytes.get(*i).is_some_and(u8::is_ascii_digit) {
        *i += 1;
    }
    let count = *i - start;
    if count > 2 {
        return None;
    }
    if count == 0 {
        return Some(None);
    }
    let digits = std::str::from_utf8(&bytes[start..*i]).ok()?;
    Some(digits.parse().ok())
}

/// Placeholder conversions of a translation disagree with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMismatch {
    /// Conversions in the source text.
    pub expected: Vec<char>,
    /// Conversions in the translation.
    pub found: Vec<char>,
}

impl fmt::Display for PlaceholderMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |convs: &[char]| {
            convs
                .iter()
                .map(|c| format!("%{c}"))
                .collect::<Vec<_>>()
                .join(" ")
        };
        write!(
            f,
            "placeholders differ: expected [{}], found [{}]",
            show(&self.expected),
            show(&self.found)
        )
    }
}

impl std::error::Error for PlaceholderMismatch {}

/// Check that `translation` keeps the placeholder count and order of
/// `source`. An empty translation is untranslated and always passes.
///
/// # Errors
///
/// Returns [`PlaceholderMismatch`] when the conversion sequences differ.
pub fn check_placeholders(source: &str, translation: &str) -> Result<(), PlaceholderMismatch> {
    if translation.is_empty() {
        return Ok(());
    }
    let expected: Vec<char> = placeholders(source).iter().map(|p| p.conversion).collect();
    let found: Vec<char> = placeholders(translation)
        .iter()
        .map(|p| p.conversion)
        .collect();
    if expected == found {
        Ok(())
    } else {
        Err(PlaceholderMismatch { expected, found })
    }
}
