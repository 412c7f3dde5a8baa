//! Frontmatter values.
//!
//! Frontmatter has no fixed schema and the same key may arrive in different
//! shapes (`tags: a, b` versus a YAML list, `duration: 30` versus
//! `duration: 30 minutes`). [`FieldValue`] keeps just enough of the shape for
//! the normalizer to coerce each field into its canonical string form.

use std::collections::BTreeMap;

use serde_yaml::Value;

/// A single frontmatter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A string scalar.
    Text(String),
    /// An integer scalar.
    Integer(i64),
    /// Any other scalar (bool, float) or nested mapping, kept in rendered form.
    Other(String),
    /// An ordered list of values.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Convert a YAML value. Returns `None` for null.
    pub fn from_yaml(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Other(n.to_string()),
            }),
            Value::Bool(b) => Some(Self::Other(b.to_string())),
            Value::Sequence(items) => Some(Self::List(
                items.iter().filter_map(Self::from_yaml).collect(),
            )),
            other => {
                let rendered = serde_yaml::to_string(other).unwrap_or_default();
                Some(Self::Other(rendered.trim().to_string()))
            }
        }
    }

    /// Render as a flat string. Lists are joined with `", "`.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) | Self::Other(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::List(items) => items
                .iter()
                .map(Self::render)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// The string content if this is a text scalar.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Parsed frontmatter: a mapping from key to value.
///
/// Keys holding null are never stored, so "present" always means "has a
/// value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    fields: BTreeMap<String, FieldValue>,
}

impl Frontmatter {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a YAML document. Returns `None` unless the document is a
    /// mapping (an empty document counts as an empty mapping).
    pub fn from_yaml(value: &Value) -> Option<Self> {
        let mapping = match value {
            Value::Null => return Some(Self::new()),
            Value::Mapping(mapping) => mapping,
            _ => return None,
        };

        let mut fm = Self::new();
        for (key, value) in mapping {
            let key = match key {
                Value::String(s) => s.clone(),
                other => match FieldValue::from_yaml(other) {
                    Some(k) => k.render(),
                    None => continue,
                },
            };
            if let Some(value) = FieldValue::from_yaml(value) {
                fm.insert(key, value);
            }
        }
        Some(fm)
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Look up a field and render it as a string.
    pub fn get_rendered(&self, key: &str) -> Option<String> {
        self.get(key).map(FieldValue::render)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Frontmatter {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        let mut fm = Self::new();
        for (k, v) in iter {
            fm.insert(k, v);
        }
        fm
    }
}
