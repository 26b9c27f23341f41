//! Scenario header metadata.
//!
//! A scenario script opens with a block of `--` comment lines:
//!
//! ```lua
//! -- Name: Clash in Shangri-La
//! -- Description: Shangri-La is under siege.
//! --- Keep it standing.
//! -- Type: Mission
//! ```
//!
//! `-- Key: value` starts a field, `--- text` appends a line to the previous
//! one. The block ends at the first line that is not a `--` comment.

/// Fields from a scenario's leading comment block, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioHeader {
    fields: Vec<(String, String)>,
}

impl ScenarioHeader {
    /// Parse the leading comment block of `source`.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut header = Self::default();
        let mut current: Option<usize> = None;

        for line in source.lines() {
            let Some(rest) = line.strip_prefix("--") else {
                break;
            };
            if let Some(more) = rest.strip_prefix('-') {
                if let Some(at) = current {
                    let value = &mut header.fields[at].1;
                    value.push('\n');
                    value.push_str(more.trim());
                }
            } else if let Some((key, value)) = rest.split_once(':') {
                let key = key.trim().to_lowercase();
                let value = value.trim().to_string();
                current = Some(header.set(key, value));
            }
        }
        header
    }

    /// Set `key`, replacing an earlier value. Returns the field's slot.
    fn set(&mut self, key: String, value: String) -> usize {
        if let Some(at) = self.fields.iter().position(|(k, _)| *k == key) {
            self.fields[at].1 = value;
            return at;
        }
        self.fields.push((key, value));
        self.fields.len() - 1
    }

    /// Value of a lower-case field name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    /// The description with carriage returns removed.
    #[must_use]
    pub fn description(&self) -> Option<String> {
        self.get("description").map(|d| d.replace('\r', ""))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
