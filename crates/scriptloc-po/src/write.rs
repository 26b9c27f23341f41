//! Catalog serializer.
//!
//! Parsed strings are written with their authored segments. Strings built in
//! code are laid out the way gettext tools do it: one segment per line when
//! the value has an inner newline, otherwise a single segment unless it would
//! overflow the page width, in which case it is broken after spaces.

use crate::entry::{Entry, PoString, Translation};
use crate::escape::escape;

/// Default page width, matching xgettext and msgmerge.
pub const DEFAULT_WIDTH: usize = 79;

/// Serializer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Maximum line width for wrapped references and generated strings.
    pub width: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
        }
    }
}

/// Serialize entries, separated by blank lines.
#[must_use]
pub fn write_entries(entries: &[Entry], options: WriteOptions) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_entry(&mut out, entry, options);
    }
    out
}

/// Append one entry, terminated by a newline.
pub fn write_entry(out: &mut String, entry: &Entry, options: WriteOptions) {
    for comment in &entry.translator_comments {
        if comment.is_empty() {
            out.push_str("#\n");
        } else {
            push_line(out, &format!("# {comment}"));
        }
    }
    for comment in &entry.extracted_comments {
        push_line(out, &format!("#. {comment}"));
    }
    write_references(out, entry, options.width);
    if !entry.flags.is_empty() {
        push_line(out, &format!("#, {}", entry.flags.join(", ")));
    }
    let marker = if entry.obsolete { "#~ " } else { "" };
    for previous in &entry.previous {
        let prefix = if entry.obsolete { "#~|" } else { "#|" };
        push_line(out, &format!("{prefix} {previous}"));
    }

    if let Some(context) = &entry.context {
        write_string(out, marker, "msgctxt", context, options.width);
    }
    write_string(out, marker, "msgid", &entry.msgid, options.width);
    if let Some(plural) = &entry.msgid_plural {
        write_string(out, marker, "msgid_plural", plural, options.width);
    }
    match &entry.msgstr {
        Translation::Singular(s) => write_string(out, marker, "msgstr", s, options.width),
        Translation::Plural(forms) => {
            for (i, form) in forms.iter().enumerate() {
                write_string(out, marker, &format!("msgstr[{i}]"), form, options.width);
            }
        }
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn write_references(out: &mut String, entry: &Entry, width: usize) {
    let mut line = String::new();
    for reference in &entry.references {
        let token = reference.to_string();
        if line.is_empty() {
            line = format!("#: {token}");
        } else if line.chars().count() + 1 + token.chars().count() > width {
            push_line(out, &line);
            line = format!("#: {token}");
        } else {
            line.push(' ');
            line.push_str(&token);
        }
    }
    if !line.is_empty() {
        push_line(out, &line);
    }
}

fn write_string(out: &mut String, marker: &str, keyword: &str, value: &PoString, width: usize) {
    let segments = match value.segments() {
        Some(segments) if !segments.is_empty() => segments.to_vec(),
        _ => layout(value.as_str(), marker.len() + keyword.len() + 1, width),
    };
    let mut iter = segments.iter();
    if let Some(first) = iter.next() {
        push_line(out, &format!("{marker}{keyword} \"{first}\""));
    }
    for segment in iter {
        push_line(out, &format!("{marker}\"{segment}\""));
    }
}

/// Escaped segments for a logical value. `prefix_len` is the width taken by
/// the keyword and its trailing space on the first line.
#[must_use]
pub fn layout(value: &str, prefix_len: usize, width: usize) -> Vec<String> {
    let mut pieces: Vec<String> = value.split_inclusive('\n').map(escape).collect();
    if pieces.is_empty() {
        pieces.push(String::new());
    }

    if pieces.len() == 1 && prefix_len + pieces[0].chars().count() + 2 <= width {
        return pieces;
    }

    let max = width.saturating_sub(2).max(1);
    let mut segments = vec![String::new()];
    for piece in &pieces {
        segments.extend(wrap_piece(piece, max));
    }
    segments
}

/// Break an escaped piece after spaces so each chunk fits in `max` columns.
/// A single word longer than `max` stays whole.
fn wrap_piece(piece: &str, max: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for word in piece.split_inclusive(' ') {
        if !current.is_empty() && current.chars().count() + word.chars().count() > max {
            chunks.push(std::mem::take(&mut current));
        }
        current.push_str(word);
    }
    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Reference;

    #[test]
    fn short_value_single_segment() {
        assert_eq!(layout("Back", 6, 79), vec!["Back"]);
    }

    #[test]
    fn empty_value() {
        assert_eq!(layout("", 6, 79), vec![""]);
    }

    #[test]
    fn trailing_newline_only_stays_single() {
        assert_eq!(layout("Done\n", 6, 79), vec!["Done\\n"]);
    }

    #[test]
    fn inner_newlines_split_per_line() {
        assert_eq!(
            layout("One\nTwo\n\nThree", 6, 79),
            vec!["", "One\\n", "Two\\n", "\\n", "Three"]
        );
    }

    #[test]
    fn long_values_wrap_after_spaces() {
        let value = "word ".repeat(30);
        let segments = layout(value.trim_end(), 6, 40);
        assert_eq!(segments[0], "");
        assert!(segments[1..].iter().all(|s| s.chars().count() <= 38));
        assert_eq!(segments.concat(), value.trim_end());
    }

    #[test]
    fn long_word_is_not_split() {
        let word = "x".repeat(100);
        let segments = layout(&word, 6, 40);
        assert_eq!(segments, vec![String::new(), word]);
    }

    #[test]
    fn writes_comments_in_order() {
        let mut entry = Entry::new("%d ships").with_msgstr("");
        entry.translator_comments.push("Status report".into());
        entry.extracted_comments.push("periodic".into());
        entry.references.push(Reference::new("a.lua", Some(3)));
        entry.add_flag("lua-format");
        let mut out = String::new();
        write_entry(&mut out, &entry, WriteOptions::default());
        assert_eq!(
            out,
            "# Status report\n#. periodic\n#: a.lua:3\n#, lua-format\nmsgid \"%d ships\"\nmsgstr \"\"\n"
        );
    }

    #[test]
    fn references_wrap_at_width() {
        let mut entry = Entry::new("Back");
        for line in 0..10 {
            entry
                .references
                .push(Reference::new("scripts/scenario_55_shangrila.lua", Some(1000 + line)));
        }
        let mut out = String::new();
        write_entry(&mut out, &entry, WriteOptions::default());
        let ref_lines: Vec<&str> = out.lines().filter(|l| l.starts_with("#:")).collect();
        assert!(ref_lines.len() > 1);
        assert!(ref_lines.iter().all(|l| l.chars().count() <= DEFAULT_WIDTH));
    }

    #[test]
    fn parsed_reference_lines_are_repacked() {
        let entries = crate::parse_entries("#: a.lua:1\n#: b.lua:2\n#: c.lua\nmsgid \"Back\"\nmsgstr \"\"\n").unwrap();
        assert_eq!(entries[0].references.len(), 3);
        let rendered = write_entries(&entries, WriteOptions::default());
        assert_eq!(rendered, "#: a.lua:1 b.lua:2 c.lua\nmsgid \"Back\"\nmsgstr \"\"\n");

        let narrow = WriteOptions { width: 12 };
        let rendered = write_entries(&entries, narrow);
        assert!(rendered.starts_with("#: a.lua:1\n#: b.lua:2\n#: c.lua\n"));
    }

    #[test]
    fn obsolete_entries_are_prefixed() {
        let mut entry = Entry::new("old").with_msgstr("vell");
        entry.obsolete = true;
        let mut out = String::new();
        write_entry(&mut out, &entry, WriteOptions::default());
        assert_eq!(out, "#~ msgid \"old\"\n#~ msgstr \"vell\"\n");
    }

    #[test]
    fn plural_forms_are_indexed() {
        let mut entry = Entry::new("%d ship");
        entry.msgid_plural = Some(PoString::new("%d ships"));
        entry.msgstr = Translation::Plural(vec![PoString::new("%d nau"), PoString::new("%d naus")]);
        let mut out = String::new();
        write_entry(&mut out, &entry, WriteOptions::default());
        assert!(out.contains("msgstr[0] \"%d nau\"\nmsgstr[1] \"%d naus\"\n"));
    }
}
