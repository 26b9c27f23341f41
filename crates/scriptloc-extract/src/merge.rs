//! Merging a fresh template into an existing language catalog.
//!
//! # Rules
//!
//! - The existing header is kept; the template's header (if any) is ignored.
//! - Template entries set order, ids, references, extracted comments and
//!   format flags.
//! - A matching existing entry (live or obsolete) supplies the translation,
//!   translator comments, previous lines and non-format flags.
//! - Existing live entries missing from the template become obsolete with
//!   their references dropped. Untranslated ones are discarded instead.
//! - Existing obsolete entries still missing from the template stay as they
//!   are.
//!
//! Matching is by exact key only.

use std::collections::{HashMap, HashSet};

use scriptloc_po::{Entry, FUZZY, MessageKey, PoFile, PoString, Translation, is_format_flag};

/// Counts from one merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Template entries that kept an existing translation slot.
    pub matched: usize,
    /// Template entries with no counterpart.
    pub added: usize,
    /// Live entries moved to obsolete.
    pub obsoleted: usize,
    /// Obsolete entries brought back by the template.
    pub revived: usize,
    /// Untranslated entries dropped because the template no longer has them.
    pub dropped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub file: PoFile,
    pub stats: MergeStats,
}

/// Merge `template` into `existing`.
#[must_use]
pub fn merge(template: &PoFile, existing: &PoFile) -> MergeOutcome {
    let mut stats = MergeStats::default();

    // First occurrence wins, live entries before obsolete ones.
    let mut by_key: HashMap<MessageKey, &Entry> = HashMap::new();
    for entry in existing.live().chain(existing.obsolete()) {
        by_key.entry(entry.key()).or_insert(entry);
    }

    let mut entries = Vec::with_capacity(template.entries.len() + 1);
    if let Some(header) = existing.header() {
        entries.push(header.clone());
    }

    let mut wanted: HashSet<MessageKey> = HashSet::new();
    for fresh in template.live() {
        let key = fresh.key();
        if !wanted.insert(key.clone()) {
            continue;
        }
        match by_key.get(&key) {
            Some(old) => {
                if old.obsolete {
                    stats.revived += 1;
                } else {
                    stats.matched += 1;
                }
                entries.push(carry_over(fresh, old));
            }
            None => {
                stats.added += 1;
                entries.push(untranslated(fresh));
            }
        }
    }

    // One retired entry per key; later copies of a key are dropped.
    let mut retired_keys: HashSet<MessageKey> = HashSet::new();
    for old in &existing.entries {
        if old.is_header() {
            continue;
        }
        let key = old.key();
        if wanted.contains(&key) || retired_keys.contains(&key) {
            continue;
        }
        if old.obsolete {
            entries.push(old.clone());
            retired_keys.insert(key);
        } else if old.msgstr.is_empty() {
            stats.dropped += 1;
        } else {
            let mut retired = old.clone();
            retired.obsolete = true;
            retired.references.clear();
            entries.push(retired);
            retired_keys.insert(key);
            stats.obsoleted += 1;
        }
    }

    tracing::debug!(
        matched = stats.matched,
        added = stats.added,
        obsoleted = stats.obsoleted,
        revived = stats.revived,
        "merged catalog"
    );
    MergeOutcome {
        file: PoFile::new(entries),
        stats,
    }
}

/// A template entry with its translation slots emptied.
fn untranslated(fresh: &Entry) -> Entry {
    let mut entry = fresh.clone();
    entry.msgstr = empty_translation(fresh);
    entry
}

fn empty_translation(fresh: &Entry) -> Translation {
    if fresh.msgid_plural.is_some() {
        Translation::Plural(vec![PoString::default(), PoString::default()])
    } else {
        Translation::default()
    }
}

fn carry_over(fresh: &Entry, old: &Entry) -> Entry {
    let mut flags: Vec<String> = fresh
        .flags
        .iter()
        .filter(|f| is_format_flag(f) || f.starts_with("no-"))
        .cloned()
        .collect();
    for flag in &old.flags {
        if !is_format_flag(flag) && !flag.starts_with("no-") && !flags.contains(flag) {
            flags.push(flag.clone());
        }
    }

    let mut entry = Entry {
        translator_comments: old.translator_comments.clone(),
        extracted_comments: fresh.extracted_comments.clone(),
        references: fresh.references.clone(),
        flags,
        previous: old.previous.clone(),
        context: fresh.context.clone(),
        msgid: fresh.msgid.clone(),
        msgid_plural: fresh.msgid_plural.clone(),
        msgstr: old.msgstr.clone(),
        obsolete: false,
    };
    if entry.translator_comments.is_empty() {
        entry.translator_comments = fresh.translator_comments.clone();
    }

    // Singular/plural shape changed: keep what can be kept and ask for review.
    let reshaped = match (&fresh.msgid_plural, &old.msgstr) {
        (Some(_), Translation::Singular(one)) => {
            Some(Translation::Plural(vec![one.clone(), PoString::default()]))
        }
        (None, Translation::Plural(forms)) => Some(Translation::Singular(
            forms.first().cloned().unwrap_or_default(),
        )),
        _ => None,
    };
    if let Some(msgstr) = reshaped {
        if !msgstr.is_empty() {
            entry.add_flag(FUZZY);
        }
        entry.msgstr = msgstr;
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "\
# Scenario name
msgid \"Clash in Shangri-La\"
msgstr \"\"

#: scripts/scenario_55_shangrila.lua:271 scripts/scenario_55_shangrila.lua:305
msgid \"Back\"
msgstr \"\"

#: scripts/scenario_55_shangrila.lua:298
#, lua-format
msgid \"Hull: %d%% Shields: %d%%\"
msgstr \"\"
";

    const CATALAN: &str = "\
msgid \"\"
msgstr \"\"
\"Language: ca\\n\"

# Scenario name
msgid \"Clash in Shangri-La\"
msgstr \"Enfrontament a Shangri-La\"

# checked by the station team
#: scripts/scenario_55_shangrila.lua:200
#, fuzzy
msgid \"Back\"
msgstr \"Enrere\"

#: scripts/scenario_55_shangrila.lua:12
msgid \"Report status\"
msgstr \"Informe d'estat\"

#: scripts/scenario_55_shangrila.lua:13
msgid \"Never translated\"
msgstr \"\"

#~ msgid \"Hull: %d%% Shields: %d%%\"
#~ msgstr \"Casc: %d%% Escuts: %d%%\"
";

    fn run() -> MergeOutcome {
        merge(
            &PoFile::parse(TEMPLATE).unwrap(),
            &PoFile::parse(CATALAN).unwrap(),
        )
    }

    #[test]
    fn keeps_header_and_template_order() {
        let outcome = run();
        let ids: Vec<&str> = outcome.file.entries.iter().map(|e| e.msgid.as_str()).collect();
        assert_eq!(
            ids,
            vec!["", "Clash in Shangri-La", "Back", "Hull: %d%% Shields: %d%%", "Report status"]
        );
        assert_eq!(outcome.file.language().as_deref(), Some("ca"));
    }

    #[test]
    fn matched_entries_keep_translation_and_take_references() {
        let outcome = run();
        let back = outcome.file.find(&MessageKey::new("Back")).unwrap();
        assert_eq!(back.msgstr.form(0), Some("Enrere"));
        assert_eq!(back.translator_comments, vec!["checked by the station team"]);
        assert!(back.is_fuzzy());
        let refs: Vec<String> = back.references.iter().map(ToString::to_string).collect();
        assert_eq!(
            refs,
            vec![
                "scripts/scenario_55_shangrila.lua:271",
                "scripts/scenario_55_shangrila.lua:305"
            ]
        );
    }

    #[test]
    fn obsolete_translation_is_revived() {
        let outcome = run();
        let hull = outcome
            .file
            .find(&MessageKey::new("Hull: %d%% Shields: %d%%"))
            .unwrap();
        assert!(!hull.obsolete);
        assert_eq!(hull.translated(), Some("Casc: %d%% Escuts: %d%%"));
        assert_eq!(hull.flags, vec!["lua-format"]);
        assert_eq!(outcome.stats.revived, 1);
    }

    #[test]
    fn removed_strings_become_obsolete_or_vanish() {
        let outcome = run();
        let retired: Vec<&Entry> = outcome.file.obsolete().collect();
        assert_eq!(retired.len(), 1);
        assert_eq!(retired[0].msgid.as_str(), "Report status");
        assert!(retired[0].references.is_empty());
        assert_eq!(
            outcome.stats,
            MergeStats {
                matched: 2,
                added: 0,
                obsoleted: 1,
                revived: 1,
                dropped: 1,
            }
        );
    }

    #[test]
    fn duplicate_removed_strings_retire_once() {
        let existing = PoFile::parse(
            "msgid \"Back\"\nmsgstr \"\"\n\n\
             msgid \"Back\"\nmsgstr \"Enrere\"\n\n\
             msgid \"Back\"\nmsgstr \"Enrere\"\n\n\
             #~ msgid \"Back\"\n#~ msgstr \"Tornar\"\n",
        )
        .unwrap();
        let template = PoFile::parse("msgid \"New\"\nmsgstr \"\"\n").unwrap();
        let outcome = merge(&template, &existing);

        let retired: Vec<&Entry> = outcome.file.obsolete().collect();
        assert_eq!(retired.len(), 1);
        assert_eq!(retired[0].translated(), Some("Enrere"));
        assert_eq!(outcome.stats.obsoleted, 1);
        assert!(outcome.file.conflicts().is_empty());
        let reparsed = PoFile::parse(&outcome.file.to_string()).unwrap();
        assert_eq!(reparsed.entries.len(), 2);
    }

    #[test]
    fn new_strings_arrive_untranslated() {
        let template = PoFile::parse("msgid \"Dock\"\nmsgstr \"\"\n").unwrap();
        let outcome = merge(&template, &PoFile::default());
        assert_eq!(outcome.stats.added, 1);
        assert_eq!(outcome.file.entries.len(), 1);
        assert!(outcome.file.entries[0].msgstr.is_empty());
    }

    #[test]
    fn plural_template_gets_two_empty_forms() {
        let template =
            PoFile::parse("msgid \"%d ship\"\nmsgid_plural \"%d ships\"\nmsgstr[0] \"\"\nmsgstr[1] \"\"\n")
                .unwrap();
        let outcome = merge(&template, &PoFile::default());
        assert_eq!(outcome.file.entries[0].msgstr.forms().len(), 2);
    }

    #[test]
    fn merging_twice_is_stable() {
        let template = PoFile::parse(TEMPLATE).unwrap();
        let once = run().file;
        let twice = merge(&template, &once).file;
        assert_eq!(once.to_string(), twice.to_string());
    }
}
