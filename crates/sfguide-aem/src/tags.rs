//! Taxonomy tag validation.

use std::collections::BTreeSet;

use regex::Regex;
use sfguide_core::{Error, Result, Taxonomy};

/// Validates comma-separated tag lists against a taxonomy's grammar.
#[derive(Debug, Clone)]
pub struct TagValidator {
    root: String,
    pattern: Regex,
}

impl TagValidator {
    /// Build a validator for `taxonomy`.
    pub fn new(taxonomy: &Taxonomy) -> Result<Self> {
        Ok(Self {
            root: taxonomy.root.clone(),
            pattern: taxonomy.tag_pattern()?,
        })
    }

    /// Whether a single tag matches the grammar.
    pub fn is_valid(&self, tag: &str) -> bool {
        self.pattern.is_match(tag)
    }

    /// Parse and validate a tag list.
    ///
    /// Optional surrounding brackets are stripped, the list is split on
    /// commas, tokens are trimmed, and empty tokens are dropped. Returns the
    /// unique tags in sorted order.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTags`] naming every token that fails the grammar.
    ///
    /// # Example
    ///
    /// ```
    /// use sfguide_aem::TagValidator;
    /// use sfguide_core::Taxonomy;
    ///
    /// let validator = TagValidator::new(&Taxonomy::default()).unwrap();
    /// let tags = validator
    ///     .validate("snowflake-site:taxonomy/b, snowflake-site:taxonomy/a,snowflake-site:taxonomy/b")
    ///     .unwrap();
    /// assert_eq!(tags, vec!["snowflake-site:taxonomy/a", "snowflake-site:taxonomy/b"]);
    ///
    /// assert!(validator.validate("snowflake-site:taxonomy").is_err());
    /// ```
    pub fn validate(&self, tags_csv: &str) -> Result<Vec<String>> {
        let trimmed = tags_csv.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .map(str::trim)
            .unwrap_or(trimmed);

        let parsed: Vec<&str> = inner
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();

        let invalid: Vec<String> = parsed
            .iter()
            .filter(|t| !self.is_valid(t))
            .map(|t| t.to_string())
            .collect();

        if !invalid.is_empty() {
            return Err(Error::invalid_tags(invalid, self.root.clone()));
        }

        let unique: BTreeSet<&str> = parsed.into_iter().collect();
        Ok(unique.into_iter().map(String::from).collect())
    }
}

/// Validate with the default taxonomy.
pub fn validate_tags(tags_csv: &str) -> Result<Vec<String>> {
    TagValidator::new(&Taxonomy::default())?.validate(tags_csv)
}
