//! Site taxonomy conventions.
//!
//! Category tags are hierarchical strings rooted in a namespace, for example
//! `snowflake-site:taxonomy/guide-category/data-science`. A [`Taxonomy`]
//! knows the root, the namespace bare categories are filed under, and the
//! grammar a finished tag must satisfy.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default taxonomy root.
pub const DEFAULT_ROOT: &str = "snowflake-site:taxonomy";

/// Default namespace for bare category names.
pub const DEFAULT_CATEGORY_NAMESPACE: &str = "guide-category";

/// Taxonomy root plus the namespace that bare category names belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxonomy {
    /// Root every tag must start with, e.g. `snowflake-site:taxonomy`.
    pub root: String,
    /// Path segment inserted between the root and a bare category name.
    pub category_namespace: String,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT.to_string(),
            category_namespace: DEFAULT_CATEGORY_NAMESPACE.to_string(),
        }
    }
}

impl Taxonomy {
    /// Create a taxonomy with a custom root and category namespace.
    pub fn new(root: impl Into<String>, category_namespace: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            category_namespace: category_namespace.into(),
        }
    }

    /// The root followed by a slash; tokens starting with this are already tags.
    pub fn root_prefix(&self) -> String {
        format!("{}/", self.root)
    }

    /// Turn one raw category token into a tag.
    ///
    /// The token is trimmed, lowercased, and has spaces replaced by hyphens.
    /// Tokens that already start with the root are kept as they are; anything
    /// else is filed under the category namespace. Returns `None` for a
    /// token that is empty after trimming.
    ///
    /// # Example
    ///
    /// ```
    /// use sfguide_core::Taxonomy;
    ///
    /// let taxonomy = Taxonomy::default();
    /// assert_eq!(
    ///     taxonomy.category_tag(" Data Science ").as_deref(),
    ///     Some("snowflake-site:taxonomy/guide-category/data-science")
    /// );
    /// assert_eq!(
    ///     taxonomy.category_tag("snowflake-site:taxonomy/product/ai").as_deref(),
    ///     Some("snowflake-site:taxonomy/product/ai")
    /// );
    /// assert_eq!(taxonomy.category_tag("   "), None);
    /// ```
    pub fn category_tag(&self, token: &str) -> Option<String> {
        let tag = token.trim().to_lowercase().replace(' ', "-");
        if tag.is_empty() {
            return None;
        }
        if tag.starts_with(&self.root_prefix()) {
            Some(tag)
        } else {
            Some(format!("{}/{}/{}", self.root, self.category_namespace, tag))
        }
    }

    /// Compile the grammar a valid tag must match: the root literal followed
    /// by one or more `/segment` groups of `[A-Za-z0-9_-]+`.
    pub fn tag_pattern(&self) -> Result<Regex> {
        let pattern = format!(r"^{}(?:/[A-Za-z0-9_-]+)+$", regex::escape(&self.root));
        Regex::new(&pattern).map_err(|e| Error::config(format!("invalid taxonomy root: {e}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // category_tag tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_category_tag_prefixes_bare_names() {
        let taxonomy = Taxonomy::default();
        assert_eq!(
            taxonomy.category_tag("AI/ML").unwrap(),
            "snowflake-site:taxonomy/guide-category/ai/ml"
        );
    }

    #[test]
    fn test_category_tag_keeps_rooted_tags() {
        let taxonomy = Taxonomy::default();
        assert_eq!(
            taxonomy
                .category_tag("Snowflake-Site:Taxonomy/Industry/Retail")
                .unwrap(),
            "snowflake-site:taxonomy/industry/retail"
        );
    }

    #[test]
    fn test_category_tag_bare_root_is_prefixed() {
        // Without a trailing slash the root is just another category name.
        let taxonomy = Taxonomy::default();
        assert_eq!(
            taxonomy.category_tag("snowflake-site:taxonomy").unwrap(),
            "snowflake-site:taxonomy/guide-category/snowflake-site:taxonomy"
        );
    }

    #[test]
    fn test_category_tag_custom_namespace() {
        let taxonomy = Taxonomy::new("acme:tags", "topics");
        assert_eq!(
            taxonomy.category_tag("Getting Started").unwrap(),
            "acme:tags/topics/getting-started"
        );
    }

    // ------------------------------------------------------------------------
    // tag_pattern tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_tag_pattern_requires_subpath() {
        let re = Taxonomy::default().tag_pattern().unwrap();
        assert!(!re.is_match("snowflake-site:taxonomy"));
        assert!(!re.is_match("snowflake-site:taxonomy/"));
        assert!(re.is_match("snowflake-site:taxonomy/guide-category/ai"));
    }

    #[test]
    fn test_tag_pattern_rejects_bad_segments() {
        let re = Taxonomy::default().tag_pattern().unwrap();
        assert!(!re.is_match("snowflake-site:taxonomy/guide category"));
        assert!(!re.is_match("snowflake-site:taxonomy//ai"));
        assert!(!re.is_match("snowflake-site:taxonomy/ai.ml"));
        assert!(!re.is_match("other:taxonomy/ai"));
    }

    #[test]
    fn test_tag_pattern_escapes_root() {
        let re = Taxonomy::new("a.b", "c").tag_pattern().unwrap();
        assert!(re.is_match("a.b/x"));
        assert!(!re.is_match("axb/x"));
    }
}
