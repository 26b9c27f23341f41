//! C-style escape handling for quoted catalog segments.
//!
//! Segments are stored in their escaped (authored) form; these helpers convert
//! between that form and the logical string the game sees.
//!
//! `escape(unescape(s)) == s` holds for every segment the writer produces, but
//! not for arbitrary authored input (octal escapes, unknown escapes). That is
//! why parsed entries keep their original segments.

/// Decode the escape sequences of one quoted segment (without the quotes).
///
/// Unknown escapes are kept literally, backslash included.
#[must_use]
pub fn unescape(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '0'..='7' => {
                let mut value = next.to_digit(8).unwrap_or(0);
                let mut digits = String::from(next);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            digits.push(chars.next().unwrap_or('0'));
                        }
                        None => break,
                    }
                }
                if value < 0x80 {
                    out.push(char::from(value as u8));
                } else {
                    // Non-ASCII octal bytes would split a UTF-8 sequence.
                    out.push('\\');
                    out.push_str(&digits);
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

/// Encode a logical string so it can be written inside a quoted segment.
#[must_use]
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{0b}' => out.push_str("\\v"),
            other => out.push(other),
        }
    }
    out
}
