//! Lua lexer and `_()` call extraction.
//!
//! # Recognized calls
//!
//! - `_("text")` and `_ "text"`
//! - `_("context", "text")`
//!
//! Arguments must be string literals, optionally joined with `..`. Calls with
//! any other argument shape are skipped. `_` must be a standalone identifier:
//! `obj._("x")` and `obj:_("x")` are method calls, not translation markers.
//!
//! # Invariants
//!
//! 1. Comments and non-argument strings never produce extractions.
//! 2. Extractions are returned in source order with the line of the `_`
//!    token.

/// Lexing failures. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("line {line}: unterminated string")]
    UnterminatedString { line: usize },
    #[error("line {line}: unterminated long string")]
    UnterminatedLongString { line: usize },
    #[error("line {line}: unterminated long comment")]
    UnterminatedComment { line: usize },
}

/// One translatable string found in a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub context: Option<String>,
    pub text: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Concat,
    LParen,
    RParen,
    Comma,
    /// `.` or `:` (member access).
    Access,
    Other,
}

struct Lexer<'a> {
    src: &'a [u8],
    text: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            src: text.as_bytes(),
            text,
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
        }
        Some(b)
    }

    fn tokens(mut self) -> Result<Vec<(Token, usize)>, LexError> {
        let mut out = Vec::new();
        while let Some(b) = self.peek() {
            let line = self.line;
            match b {
                b' ' | b'\t' | b'\r' | b'\n' | b'\x0b' | b'\x0c' => {
                    self.bump();
                }
                b'-' if self.peek_at(1) == Some(b'-') => {
                    self.pos += 2;
                    self.skip_comment(line)?;
                }
                b'"' | b'\'' => {
                    self.bump();
                    let s = self.short_string(b, line)?;
                    out.push((Token::Str(s), line));
                }
                b'[' if matches!(self.peek_at(1), Some(b'[' | b'=')) => {
                    match self.long_bracket_level() {
                        Some(level) => {
                            let s = self
                                .long_string(level)
                                .ok_or(LexError::UnterminatedLongString { line })?;
                            out.push((Token::Str(s), line));
                        }
                        None => {
                            self.bump();
                            out.push((Token::Other, line));
                        }
                    }
                }
                b'.' => {
                    if self.peek_at(1) == Some(b'.') {
                        if self.peek_at(2) == Some(b'.') {
                            self.pos += 3;
                            out.push((Token::Other, line));
                        } else {
                            self.pos += 2;
                            out.push((Token::Concat, line));
                        }
                    } else if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
                        self.number();
                        out.push((Token::Other, line));
                    } else {
                        self.bump();
                        out.push((Token::Access, line));
                    }
                }
                b':' => {
                    if self.peek_at(1) == Some(b':') {
                        self.pos += 2;
                        out.push((Token::Other, line));
                    } else {
                        self.bump();
                        out.push((Token::Access, line));
                    }
                }
                b'(' => {
                    self.bump();
                    out.push((Token::LParen, line));
                }
                b')' => {
                    self.bump();
                    out.push((Token::RParen, line));
                }
                b',' => {
                    self.bump();
                    out.push((Token::Comma, line));
                }
                b if b.is_ascii_alphabetic() || b == b'_' => {
                    let start = self.pos;
                    while self
                        .peek()
                        .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_')
                    {
                        self.pos += 1;
                    }
                    out.push((Token::Ident(self.text[start..self.pos].to_string()), line));
                }
                b if b.is_ascii_digit() => {
                    self.number();
                    out.push((Token::Other, line));
                }
                _ => {
                    // Skip a whole UTF-8 character.
                    self.bump();
                    while self.peek().is_some_and(|c| (c & 0xc0) == 0x80) {
                        self.pos += 1;
                    }
                    out.push((Token::Other, line));
                }
            }
        }
        Ok(out)
    }

    fn number(&mut self) {
        while let Some(c) = self.peek() {
            let exponent_sign = matches!(c, b'+' | b'-')
                && self
                    .pos
                    .checked_sub(1)
                    .and_then(|p| self.src.get(p))
                    .is_some_and(|prev| matches!(prev, b'e' | b'E' | b'p' | b'P'));
            if c.is_ascii_alphanumeric() || c == b'.' || c == b'_' || exponent_sign {
                // Stop before a `..` concat operator.
                if c == b'.' && self.peek_at(1) == Some(b'.') {
                    break;
                }
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self, line: usize) -> Result<(), LexError> {
        if self.peek() == Some(b'[') {
            if let Some(level) = self.long_bracket_level() {
                return self
                    .long_string(level)
                    .map(|_| ())
                    .ok_or(LexError::UnterminatedComment { line });
            }
        }
        while let Some(b) = self.peek() {
            if b == b'\n' {
                break;
            }
            self.pos += 1;
        }
        Ok(())
    }

    /// At `[`, consume `[` `=`* `[` and return the level. Leaves the
    /// position untouched if this is not a long bracket.
    fn long_bracket_level(&mut self) -> Option<usize> {
        let mut i = self.pos + 1;
        let mut level = 0;
        while self.src.get(i) == Some(&b'=') {
            level += 1;
            i += 1;
        }
        if self.src.get(i) != Some(&b'[') {
            return None;
        }
        self.pos = i + 1;
        Some(level)
    }

    /// Body of a long string/comment; the opening bracket is consumed.
    fn long_string(&mut self, level: usize) -> Option<String> {
        // A newline directly after the opening bracket is skipped.
        if self.peek() == Some(b'\r') {
            self.bump();
        }
        if self.peek() == Some(b'\n') {
            self.bump();
        }
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b']' {
                let mut i = self.pos + 1;
                let mut eq = 0;
                while self.src.get(i) == Some(&b'=') {
                    eq += 1;
                    i += 1;
                }
                if eq == level && self.src.get(i) == Some(&b']') {
                    let body = self.text[start..self.pos].to_string();
                    self.pos = i + 1;
                    return Some(body);
                }
            }
            self.bump();
        }
        None
    }

    /// Body of a quoted string with escapes decoded; the opening quote is
    /// consumed.
    fn short_string(&mut self, quote: u8, line: usize) -> Result<String, LexError> {
        let mut bytes = Vec::new();
        loop {
            let b = self
                .bump()
                .ok_or(LexError::UnterminatedString { line })?;
            match b {
                b'\n' => return Err(LexError::UnterminatedString { line }),
                b'\\' => {
                    let e = self
                        .bump()
                        .ok_or(LexError::UnterminatedString { line })?;
                    match e {
                        b'n' => bytes.push(b'\n'),
                        // Backslash-newline; `\r\n` and `\n\r` count as one.
                        b'\n' | b'\r' => {
                            let pair = if e == b'\n' { b'\r' } else { b'\n' };
                            if self.peek() == Some(pair) {
                                self.bump();
                            }
                            bytes.push(b'\n');
                        }
                        b't' => bytes.push(b'\t'),
                        b'r' => bytes.push(b'\r'),
                        b'a' => bytes.push(0x07),
                        b'b' => bytes.push(0x08),
                        b'f' => bytes.push(0x0c),
                        b'v' => bytes.push(0x0b),
                        b'x' => {
                            let hex: String = (0..2).filter_map(|_| self.bump().map(char::from)).collect();
                            match u8::from_str_radix(&hex, 16) {
                                Ok(v) => bytes.push(v),
                                Err(_) => bytes.extend_from_slice(format!("\\x{hex}").as_bytes()),
                            }
                        }
                        b'z' => {
                            while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
                                self.bump();
                            }
                        }
                        b'u' => self.unicode_escape(&mut bytes),
                        d if d.is_ascii_digit() => {
                            let mut value = u32::from(d - b'0');
                            for _ in 0..2 {
                                match self.peek() {
                                    Some(n) if n.is_ascii_digit() => {
                                        value = value * 10 + u32::from(n - b'0');
                                        self.bump();
                                    }
                                    _ => break,
                                }
                            }
                            bytes.push(u8::try_from(value).unwrap_or(b'?'));
                        }
                        other => bytes.push(other),
                    }
                }
                b if b == quote => break,
                other => bytes.push(other),
            }
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn unicode_escape(&mut self, bytes: &mut Vec<u8>) {
        if self.peek() != Some(b'{') {
            bytes.extend_from_slice(b"\\u");
            return;
        }
        self.bump();
        let mut hex = String::new();
        while let Some(c) = self.peek() {
            self.bump();
            if c == b'}' {
                break;
            }
            hex.push(char::from(c));
        }
        match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
            Some(ch) => {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            None => bytes.extend_from_slice(format!("\\u{{{hex}}}").as_bytes()),
        }
    }
}

/// Parse `Str (.. Str)*` at `i`; returns the joined value and the index
/// after it.
fn literal(tokens: &[(Token, usize)], mut i: usize) -> Option<(String, usize)> {
    let Some((Token::Str(first), _)) = tokens.get(i) else {
        return None;
    };
    let mut value = first.clone();
    i += 1;
    while let (Some((Token::Concat, _)), Some((Token::Str(next), _))) = (tokens.get(i), tokens.get(i + 1)) {
        value.push_str(next);
        i += 2;
    }
    Some((value, i))
}

/// Find every `_()` translation call in Lua `source`.
///
/// # Errors
///
/// Returns a [`LexError`] when a string or long comment is unterminated.
pub fn extract_calls(source: &str) -> Result<Vec<Extracted>, LexError> {
    let tokens = Lexer::new(source).tokens()?;
    let mut found = Vec::new();

    for (i, (token, line)) in tokens.iter().enumerate() {
        if !matches!(token, Token::Ident(name) if name == "_") {
            continue;
        }
        if i > 0 && matches!(tokens[i - 1].0, Token::Access) {
            continue;
        }
        match tokens.get(i + 1) {
            Some((Token::Str(text), _)) => found.push(Extracted {
                context: None,
                text: text.clone(),
                line: *line,
            }),
            Some((Token::LParen, _)) => {
                let Some((first, next)) = literal(&tokens, i + 2) else {
                    continue;
                };
                match tokens.get(next) {
                    Some((Token::RParen, _)) => found.push(Extracted {
                        context: None,
                        text: first,
                        line: *line,
                    }),
                    Some((Token::Comma, _)) => {
                        if let Some((second, after)) = literal(&tokens, next + 1) {
                            if matches!(tokens.get(after), Some((Token::RParen, _))) {
                                found.push(Extracted {
                                    context: Some(first),
                                    text: second,
                                    line: *line,
                                });
                            }
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        extract_calls(source)
            .unwrap()
            .into_iter()
            .map(|e| e.text)
            .collect()
    }

    #[test]
    fn simple_calls() {
        let src = r#"addCommsReply(_("Back"), commsStation)
setCommsMessage(_('Not enough reputation.'))"#;
        let found = extract_calls(src).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].text, "Back");
        assert_eq!(found[0].line, 1);
        assert_eq!(found[1].text, "Not enough reputation.");
        assert_eq!(found[1].line, 2);
    }

    #[test]
    fn context_calls() {
        let found = extract_calls(r#"x = _("faction", "Human Navy")"#).unwrap();
        assert_eq!(found[0].context.as_deref(), Some("faction"));
        assert_eq!(found[0].text, "Human Navy");
    }

    #[test]
    fn concatenated_literals() {
        assert_eq!(
            texts(r#"_("Sector dominance report:\n" .. "Kraylor: %d")"#),
            vec!["Sector dominance report:\nKraylor: %d"]
        );
    }

    #[test]
    fn call_without_parens() {
        assert_eq!(texts(r#"print(_ "Report status")"#), vec!["Report status"]);
    }

    #[test]
    fn skips_non_literal_arguments() {
        assert!(texts(r#"_(name)"#).is_empty());
        assert!(texts(r#"_("Kraylor: " .. count)"#).is_empty());
        assert!(texts(r#"_("a", b)"#).is_empty());
    }

    #[test]
    fn skips_member_calls_and_other_idents() {
        assert!(texts(r#"obj._("x") obj:_("y") __("z") _x("w")"#).is_empty());
    }

    #[test]
    fn comments_are_ignored() {
        let src = "-- _(\"in comment\")\n--[[ _(\"block\") ]]\n--[==[ ]] _(\"deep\") ]==]\n_(\"real\")";
        let found = extract_calls(src).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "real");
        assert_eq!(found[0].line, 4);
    }

    #[test]
    fn long_strings() {
        let src = "_([[\nGood day, captain.\nWelcome.]])";
        assert_eq!(texts(src), vec!["Good day, captain.\nWelcome."]);
        assert_eq!(texts("_([==[a]]b]==])"), vec!["a]]b"]);
    }

    #[test]
    fn escapes_in_short_strings() {
        assert_eq!(texts(r#"_("tab\there \"q\" \65\x42")"#), vec!["tab\there \"q\" AB"]);
        assert_eq!(texts(r#"_("caf\u{E9}")"#), vec!["café"]);
        assert_eq!(texts("_(\"a\\z\n    b\")"), vec!["ab"]);
    }

    #[test]
    fn backslash_line_breaks_in_crlf_scripts() {
        let found = extract_calls("_(\"one\\\r\ntwo\")\r\n_(\"next\")\r\n").unwrap();
        assert_eq!(found[0].text, "one\ntwo");
        assert_eq!(found[1].line, 3);
        assert_eq!(texts("_(\"a\\\n\rb\")"), vec!["a\nb"]);
        assert_eq!(texts("_(\"a\\\nb\")"), vec!["a\nb"]);
    }

    #[test]
    fn line_numbers_follow_multiline_strings() {
        let src = "x = [[\none\ntwo]]\n_(\"after\")";
        let found = extract_calls(src).unwrap();
        assert_eq!(found[0].line, 4);
    }

    #[test]
    fn numbers_and_concat() {
        assert_eq!(texts(r#"y = 1..2 z = 1e-3 _("n")"#), vec!["n"]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = extract_calls("_(\"open\n)").unwrap_err();
        assert_eq!(err, LexError::UnterminatedString { line: 1 });
    }

    #[test]
    fn unterminated_long_comment_is_an_error() {
        let err = extract_calls("\n--[[ never closed").unwrap_err();
        assert_eq!(err, LexError::UnterminatedComment { line: 2 });
    }

    #[test]
    fn index_brackets_are_not_long_strings() {
        assert_eq!(texts(r#"t[1] = _("x") t[ [[k]] ] = 2"#), vec!["x"]);
    }
}
