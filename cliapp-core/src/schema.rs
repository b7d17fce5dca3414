//! Record schemas and the classification of their fields.
//!
//! A [`RecordSchema`] is the declared shape of a record parameter. Each
//! [`FieldSpec`] carries the metadata that decides how tokens reach it: an
//! explicit position, long and short overrides, and help text. Schemas are
//! plain data and deserialize from TOML or JSON as well as being built in
//! code.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::kind::Kind;

/// Declared metadata for one record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: Kind,
    /// Value may be omitted; absent and zero stay distinguishable
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub position: Option<usize>,
    #[serde(default, deserialize_with = "de_long")]
    pub long: Option<String>,
    #[serde(default, deserialize_with = "de_short")]
    pub short: Option<String>,
    #[serde(default)]
    pub help: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
            position: None,
            long: None,
            short: None,
            help: None,
        }
    }

    pub fn position(mut self, index: usize) -> Self {
        self.position = Some(index);
        self
    }

    /// Long name override; a missing `--` prefix is added.
    pub fn long(mut self, name: &str) -> Self {
        self.long = Some(long_prefixed(name));
        self
    }

    /// Short alias; a missing `-` prefix is added.
    pub fn short(mut self, name: &str) -> Self {
        self.short = Some(short_prefixed(name));
        self
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = Some(text.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Bool fields never take a value token.
    pub fn is_flag(&self) -> bool {
        self.kind.is_bool()
    }

    /// Long name the field answers to when it is an option.
    pub fn long_name(&self) -> String {
        self.long
            .clone()
            .unwrap_or_else(|| format!("--{}", to_kebab(&self.name)))
    }

    /// Name shown for the field in the Arguments block of help.
    pub fn display_name(&self) -> String {
        match self.help.as_deref() {
            Some(help) if !help.is_empty() => help.to_string(),
            _ => to_words(&self.name),
        }
    }
}

fn long_prefixed(name: &str) -> String {
    if name.starts_with("--") {
        name.to_string()
    } else {
        format!("--{}", name)
    }
}

fn short_prefixed(name: &str) -> String {
    if name.starts_with('-') {
        name.to_string()
    } else {
        format!("-{}", name)
    }
}

// Schema files get the same prefix rule as the builder
fn de_long<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.map(|name| long_prefixed(&name)))
}

fn de_short<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.map(|name| short_prefixed(&name)))
}

/// Declared shape of a record parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSchema {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl RecordSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the lookup tables used by the binder.
    ///
    /// Fields are visited in declaration order, so when two fields claim the
    /// same name the later one wins.
    pub fn extract(&self) -> FieldTable {
        let mut table = FieldTable::default();

        for (index, field) in self.fields.iter().enumerate() {
            if let Some(pos) = field.position {
                if let Some(prev) = table.positional.insert(pos, index) {
                    warn!(record = %self.name, position = pos, "field {} shadows {} at the same position", field.name, self.fields[prev].name);
                }
                // Positional fields stay addressable by name when asked to be
                if let Some(long) = &field.long {
                    table.insert_long(&self.name, long.clone(), index);
                }
            } else {
                table.insert_long(&self.name, field.long_name(), index);
            }

            if let Some(short) = &field.short {
                if let Some(prev) = table.short.insert(short.clone(), index) {
                    if prev != index {
                        warn!(record = %self.name, "short option {} declared twice, last declaration wins", short);
                    }
                }
            }
        }

        table
    }

    pub fn max_position(&self) -> Option<usize> {
        self.fields.iter().filter_map(|f| f.position).max()
    }

    /// Positions below the highest declared index that no field fills.
    pub fn positional_gaps(&self) -> Vec<usize> {
        let Some(max) = self.max_position() else {
            return Vec::new();
        };
        (0..=max)
            .filter(|p| !self.fields.iter().any(|f| f.position == Some(*p)))
            .collect()
    }

    pub fn options(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.position.is_none())
    }
}

/// Lookup tables from positions and option names to field indices.
#[derive(Debug, Clone, Default)]
pub struct FieldTable {
    pub positional: BTreeMap<usize, usize>,
    pub long: HashMap<String, usize>,
    pub short: HashMap<String, usize>,
}

impl FieldTable {
    fn insert_long(&mut self, record: &str, name: String, index: usize) {
        if let Some(prev) = self.long.insert(name.clone(), index) {
            if prev != index {
                warn!(record = %record, "long option {} declared twice, last declaration wins", name);
            }
        }
    }
}

/// `OutDir` becomes `out-dir`, `out_dir` becomes `out-dir`.
pub fn to_kebab(name: &str) -> String {
    split_words(name).join("-")
}

/// `FilePath` becomes `file path`.
pub fn to_words(name: &str) -> String {
    split_words(name).join(" ")
}

fn split_words(name: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for c in name.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if c.is_uppercase() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.extend(c.to_lowercase());
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
