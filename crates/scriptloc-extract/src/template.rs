//! Template catalog construction from one scenario script.

use std::collections::HashMap;

use scriptloc_po::placeholder::has_placeholders;
use scriptloc_po::{Entry, MessageKey, PoFile, Reference};

use crate::header::ScenarioHeader;
use crate::lua::{Extracted, LexError, extract_calls};

/// Flag added to extracted strings that contain placeholders.
pub const LUA_FORMAT: &str = "lua-format";

/// A template catalog and how many `_()` calls fed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub file: PoFile,
    /// Number of `_()` calls found, duplicates included. Header entries
    /// are not counted.
    pub extracted: usize,
}

impl Template {
    /// Whether the script contributed no translatable calls.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extracted == 0
    }
}

/// Build the template for a script.
///
/// `label` is the path written into `#:` references, e.g.
/// `scripts/scenario_55_shangrila.lua`.
///
/// # Errors
///
/// Returns a [`LexError`] if the script cannot be tokenized.
pub fn build_template(label: &str, source: &str) -> Result<Template, LexError> {
    let header = ScenarioHeader::parse(source);
    let calls = extract_calls(source)?;
    Ok(assemble(label, &header, &calls))
}

/// Header entries first, then extracted strings in first-occurrence order.
#[must_use]
pub fn assemble(label: &str, header: &ScenarioHeader, calls: &[Extracted]) -> Template {
    let mut builder = Builder::default();

    if let Some(name) = header.name() {
        builder
            .entry(MessageKey::new(name))
            .translator_comments
            .push("Scenario name".to_string());
    }
    if let Some(description) = header.description() {
        builder
            .entry(MessageKey::new(description))
            .translator_comments
            .push("Scenario description".to_string());
    }

    for call in calls {
        let key = MessageKey {
            context: call.context.clone(),
            id: call.text.clone(),
        };
        let entry = builder.entry(key);
        let reference = Reference::new(label, u32::try_from(call.line).ok());
        if !entry.references.contains(&reference) {
            entry.references.push(reference);
        }
        if has_placeholders(&call.text) {
            entry.add_flag(LUA_FORMAT);
        }
    }

    Template {
        file: PoFile::new(builder.entries),
        extracted: calls.len(),
    }
}

#[derive(Default)]
struct Builder {
    entries: Vec<Entry>,
    index: HashMap<MessageKey, usize>,
}

impl Builder {
    fn entry(&mut self, key: MessageKey) -> &mut Entry {
        let at = match self.index.get(&key) {
            Some(&at) => at,
            None => {
                let mut entry = Entry::new(key.id.clone());
                if let Some(context) = &key.context {
                    entry = entry.with_context(context.clone());
                }
                self.entries.push(entry);
                self.index.insert(key, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[at]
    }
}
