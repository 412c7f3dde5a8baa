//! Ordered form data and Sling POST encoding.
//!
//! Sling field paths such as `./jcr:content/cq:tags` use `:` and `/`
//! structurally, so both stay literal in the encoded body. Everything else
//! follows `application/x-www-form-urlencoded`: unreserved characters pass
//! through, spaces become `+`, and all other bytes are percent-encoded.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes that must be percent-encoded in a Sling form value.
const SLING_FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b':')
    .remove(b'/');

/// Encode one key or value.
///
/// ```
/// use sfguide_aem::form::encode_component;
///
/// assert_eq!(encode_component("./jcr:title"), "./jcr:title");
/// assert_eq!(encode_component("a b&c=d"), "a+b%26c%3Dd");
/// assert_eq!(encode_component("String[]"), "String%5B%5D");
/// ```
pub fn encode_component(input: &str) -> String {
    input
        .split(' ')
        .map(|part| utf8_percent_encode(part, SLING_FORM).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

/// An ordered list of form fields. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push((key.into(), value.into()));
    }

    /// Append a field only when `value` is non-empty.
    pub fn push_non_empty(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.push(key, value);
        }
    }

    /// Append a multi-value field: a `@TypeHint` of `String[]` followed by
    /// one entry per value.
    pub fn push_string_array(&mut self, key: &str, values: &[String]) {
        self.push(format!("{key}@TypeHint"), "String[]");
        for value in values {
            self.push(key, value.as_str());
        }
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// All values for `key`, in insertion order.
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether any field has this key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the form is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render as a URL-encoded query string, preserving order.
    pub fn encode(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
