//! Positional `string.format` substitution.
//!
//! # Invariants
//!
//! 1. **Single pass**: each placeholder consumes the next argument in order;
//!    substituted text is never rescanned.
//! 2. **Never fails**: a placeholder with no argument, or with an argument
//!    it cannot render, is emitted verbatim.

use std::fmt;

use scriptloc_po::placeholder::{Placeholder, Segment, segments};

/// A value substituted into a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Int(i64),
    Float(f64),
    Str(String),
}

impl FormatArg {
    /// Interpret command-line style input: integer, then float, else text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if let Ok(i) = text.parse::<i64>() {
            Self::Int(i)
        } else if let Ok(f) = text.parse::<f64>() {
            Self::Float(f)
        } else {
            Self::Str(text.to_string())
        }
    }

    fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Self::Float(_) => None,
            Self::Str(s) => s.trim().parse().ok(),
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Str(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => f.write_str(&format_general(*v, 14, false, false)),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FormatArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FormatArg {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for FormatArg {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Substitute `args` into `template` positionally.
///
/// `%%` becomes `%`. Extra arguments are ignored.
#[must_use]
pub fn format_template(template: &str, args: &[FormatArg]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut next = args.iter();

    for segment in segments(template) {
        match segment {
            Segment::Text(text) => out.push_str(&text),
            Segment::Placeholder(p) => {
                let rendered = next.next().and_then(|arg| render(&p, arg));
                match rendered {
                    Some(text) => out.push_str(&text),
                    None => out.push_str(p.as_str(template)),
                }
            }
        }
    }

    out
}

fn render(p: &Placeholder, arg: &FormatArg) -> Option<String> {
    let (body, numeric) = match p.conversion {
        'd' | 'i' | 'u' => (format_integer(p, arg.as_int()?), true),
        'c' => (char::from_u32(u32::try_from(arg.as_int()?).ok()?)?.to_string(), false),
        'x' | 'X' | 'o' => (format_radix(p, arg.as_int()?), true),
        'f' | 'e' | 'E' | 'g' | 'G' | 'a' | 'A' => (format_float(p, arg.as_float()?), true),
        's' => {
            let text = arg.to_string();
            let text = match p.precision {
                Some(n) => text.chars().take(n).collect(),
                None => text,
            };
            (text, false)
        }
        'q' => (quote(&arg.to_string()), false),
        _ => return None,
    };
    Some(pad(p, body, numeric))
}

fn sign_prefix(p: &Placeholder, negative: bool) -> &'static str {
    if negative {
        "-"
    } else if p.plus_sign() {
        "+"
    } else if p.flags.contains(' ') {
        " "
    } else {
        ""
    }
}

fn format_integer(p: &Placeholder, value: i64) -> String {
    let mut digits = value.unsigned_abs().to_string();
    if let Some(min) = p.precision {
        if min == 0 && value == 0 {
            digits.clear();
        }
        while digits.len() < min {
            digits.insert(0, '0');
        }
    }
    format!("{}{digits}", sign_prefix(p, value < 0))
}

fn format_radix(p: &Placeholder, value: i64) -> String {
    // Negative values wrap, as in C.
    let bits = value as u64;
    let alternate = p.flags.contains('#') && bits != 0;
    match p.conversion {
        'x' => format!("{}{bits:x}", if alternate { "0x" } else { "" }),
        'X' => format!("{}{bits:X}", if alternate { "0X" } else { "" }),
        _ => format!("{}{bits:o}", if alternate { "0" } else { "" }),
    }
}

fn format_float(p: &Placeholder, value: f64) -> String {
    let upper = p.conversion.is_ascii_uppercase();
    if !value.is_finite() {
        let text = if value.is_nan() {
            "nan"
        } else {
            "inf"
        };
        let text = if upper { text.to_ascii_uppercase() } else { text.to_string() };
        let negative = value.is_sign_negative() && !value.is_nan();
        return format!("{}{text}", sign_prefix(p, negative));
    }

    let negative = value.is_sign_negative() && value != 0.0;
    let magnitude = value.abs();
    let precision = p.precision.unwrap_or(6);
    let alternate = p.flags.contains('#');
    let body = match p.conversion {
        'f' => format!("{magnitude:.precision$}"),
        'e' | 'E' | 'a' | 'A' => format_exponent(magnitude, precision, upper),
        _ => format_general(magnitude, precision, alternate, upper),
    };
    format!("{}{body}", sign_prefix(p, negative))
}

/// `d.ddde+XX` with at least two exponent digits.
fn format_exponent(value: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{value:.precision$e}");
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exp: i32 = exponent.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    let marker = if upper { 'E' } else { 'e' };
    format!("{mantissa}{marker}{sign}{:02}", exp.unsigned_abs())
}

/// `%g`: shortest of `%e`/`%f` for the given significant digits.
fn format_general(value: f64, precision: usize, alternate: bool, upper: bool) -> String {
    let significant = precision.max(1);
    if value == 0.0 {
        return if alternate {
            format!("{:.*}", significant - 1, 0.0)
        } else {
            "0".to_string()
        };
    }
    let exponent = value.abs().log10().floor() as i32;
    // Rounding can bump the exponent (9.99 -> 10.0).
    let scientific = format_exponent(value, significant - 1, upper);
    let exponent = scientific
        .rsplit_once(['e', 'E'])
        .and_then(|(_, e)| e.parse::<i32>().ok())
        .unwrap_or(exponent);

    let text = if exponent < -4 || exponent >= significant as i32 {
        scientific
    } else {
        let decimals = (significant as i32 - 1 - exponent).max(0) as usize;
        format!("{value:.decimals$}")
    };

    if alternate {
        text
    } else {
        trim_fraction(&text)
    }
}

fn trim_fraction(text: &str) -> String {
    let (number, exponent) = match text.find(['e', 'E']) {
        Some(at) => text.split_at(at),
        None => (text, ""),
    };
    let number = if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    };
    format!("{number}{exponent}")
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn pad(p: &Placeholder, body: String, numeric: bool) -> String {
    let Some(width) = p.width else {
        return body;
    };
    let len = body.chars().count();
    if len >= width {
        return body;
    }
    let fill = width - len;
    if p.left_align() {
        return format!("{body}{}", " ".repeat(fill));
    }
    let zero_ok = numeric && p.zero_pad() && !(p.precision.is_some() && is_integer_conv(p.conversion));
    if zero_ok && !body.ends_with("nan") && !body.ends_with("inf") {
        let sign_len = body
            .chars()
            .take_while(|c| matches!(c, '-' | '+' | ' '))
            .count();
        let prefix_len = if body[sign_len..].starts_with("0x") || body[sign_len..].starts_with("0X") {
            sign_len + 2
        } else {
            sign_len
        };
        let (head, tail) = body.split_at(prefix_len);
        return format!("{head}{}{tail}", "0".repeat(fill));
    }
    format!("{}{body}", " ".repeat(fill))
}

fn is_integer_conv(c: char) -> bool {
    matches!(c, 'd' | 'i' | 'u' | 'x' | 'X' | 'o')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(template: &str, args: &[FormatArg]) -> String {
        format_template(template, args)
    }

    #[test]
    fn integers() {
        assert_eq!(fmt("%d ships", &[12.into()]), "12 ships");
        assert_eq!(fmt("%i", &[(-7).into()]), "-7");
        assert_eq!(fmt("%+d", &[5.into()]), "+5");
        assert_eq!(fmt("%03d", &[7.into()]), "007");
        assert_eq!(fmt("%-4d|", &[7.into()]), "7   |");
        assert_eq!(fmt("%4d", &[(-7).into()]), "  -7");
        assert_eq!(fmt("%05d", &[(-7).into()]), "-0007");
        assert_eq!(fmt("%.3d", &[7.into()]), "007");
    }

    #[test]
    fn floats_truncate_for_integer_conversions() {
        assert_eq!(fmt("%d", &[FormatArg::Float(9.8)]), "9");
    }

    #[test]
    fn fixed_point() {
        assert_eq!(fmt("%.1f%%", &[42.26.into()]), "42.3%");
        assert_eq!(fmt("%f", &[1.5.into()]), "1.500000");
        assert_eq!(fmt("%6.2f", &[3.14159.into()]), "  3.14");
        assert_eq!(fmt("%.0f", &[2.into()]), "2");
    }

    #[test]
    fn exponent_and_general() {
        assert_eq!(fmt("%e", &[1500.0.into()]), "1.500000e+03");
        assert_eq!(fmt("%.2E", &[0.000123.into()]), "1.23E-04");
        assert_eq!(fmt("%g", &[100000.0.into()]), "100000");
        assert_eq!(fmt("%g", &[1000000.0.into()]), "1e+06");
        assert_eq!(fmt("%g", &[0.5.into()]), "0.5");
        assert_eq!(fmt("%g", &[0.0001.into()]), "0.0001");
        assert_eq!(fmt("%g", &[0.00001.into()]), "1e-05");
        assert_eq!(fmt("%g", &[0.0.into()]), "0");
    }

    #[test]
    fn strings() {
        assert_eq!(fmt("The %s fleet", &["Kraylor".into()]), "The Kraylor fleet");
        assert_eq!(fmt("%5s|", &["ab".into()]), "   ab|");
        assert_eq!(fmt("%-5s|", &["ab".into()]), "ab   |");
        assert_eq!(fmt("%.3s", &["Exuari".into()]), "Exu");
        assert_eq!(fmt("%s", &[3.into()]), "3");
        assert_eq!(fmt("%s", &[FormatArg::Float(0.5)]), "0.5");
    }

    #[test]
    fn radix_and_char() {
        assert_eq!(fmt("%x", &[255.into()]), "ff");
        assert_eq!(fmt("%#X", &[255.into()]), "0XFF");
        assert_eq!(fmt("%o", &[8.into()]), "10");
        assert_eq!(fmt("%c", &[65.into()]), "A");
    }

    #[test]
    fn quoted() {
        assert_eq!(fmt("%q", &["say \"hi\"\n".into()]), "\"say \\\"hi\\\"\\n\"");
    }

    #[test]
    fn missing_args_leave_placeholder() {
        assert_eq!(
            fmt("Kraylor: %d, Exuari: %d", &[3.into()]),
            "Kraylor: 3, Exuari: %d"
        );
        assert_eq!(fmt("%5.1f", &[]), "%5.1f");
    }

    #[test]
    fn unrenderable_arg_leaves_placeholder() {
        assert_eq!(fmt("%d ships", &["many".into()]), "%d ships");
    }

    #[test]
    fn percent_literal() {
        assert_eq!(fmt("Hull: %d%%", &[80.into()]), "Hull: 80%");
        assert_eq!(fmt("50%% more", &[]), "50% more");
    }

    #[test]
    fn extra_args_ignored() {
        assert_eq!(fmt("%s", &["a".into(), "b".into()]), "a");
    }

    #[test]
    fn non_finite() {
        assert_eq!(fmt("%f", &[f64::INFINITY.into()]), "inf");
        assert_eq!(fmt("%F", &[f64::NEG_INFINITY.into()]), "%F");
        assert_eq!(fmt("%E", &[f64::NAN.into()]), "NAN");
    }

    #[test]
    fn parse_args() {
        assert_eq!(FormatArg::parse("12"), FormatArg::Int(12));
        assert_eq!(FormatArg::parse("1.5"), FormatArg::Float(1.5));
        assert_eq!(FormatArg::parse("Kraylor"), FormatArg::Str("Kraylor".into()));
    }
}
