//! Coercing frontmatter fields into their canonical string forms.
//!
//! Each record field has its own small rule (see the functions below); none
//! of them fail. Missing fields resolve to defaults, lists are comma-joined,
//! and categories become taxonomy tags.

use sfguide_core::{LinkTemplate, Taxonomy};

use crate::fields::{FieldValue, Frontmatter};
use crate::record::{LegacyUrl, ParsedRecord};

/// Default language when the frontmatter names none.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default publication status.
pub const DEFAULT_STATUS: &str = "Published";

/// Derives [`ParsedRecord`] metadata fields from frontmatter.
#[derive(Debug, Clone, Default)]
pub struct FieldNormalizer {
    taxonomy: Taxonomy,
    fork_repo: LinkTemplate,
}

impl FieldNormalizer {
    /// Create a normalizer with custom conventions.
    pub fn new(taxonomy: Taxonomy, fork_repo: LinkTemplate) -> Self {
        Self {
            taxonomy,
            fork_repo,
        }
    }

    /// Taxonomy used for categories.
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Build the metadata portion of a record.
    ///
    /// Body, rewrite count, and pass-through identifiers are left at their
    /// defaults; `quickstart_name` is only used as the id fallback.
    pub fn normalize(&self, fm: &Frontmatter, quickstart_name: &str) -> ParsedRecord {
        let id = text_or(fm, "id", quickstart_name);
        let author = text_or(fm, "author", "");

        ParsedRecord {
            title: text_or(fm, "title", &id),
            summary: first_text(fm, &["summary", "description"]),
            language: text_or(fm, "language", DEFAULT_LANGUAGE).to_lowercase(),
            status: text_or(fm, "status", DEFAULT_STATUS),
            categories: normalize_categories(fm.get("categories"), &self.taxonomy),
            level: first_text(fm, &["level", "difficulty"]),
            partner: text_or(fm, "partner", ""),
            authors: text_or(fm, "authors", &author),
            author,
            tags: text_or(fm, "tags", ""),
            environments: text_or(fm, "environments", ""),
            duration: normalize_duration(fm.get("duration")),
            feedback_link: text_or(fm, "feedback_link", ""),
            fork_repo_link: match fm.get_rendered("fork_repo_link") {
                Some(link) if !link.is_empty() => link,
                _ => self.fork_repo.render(&id),
            },
            open_in_snowflake_link: text_or(fm, "open_in_snowflake_link", ""),
            legacy_urls: normalize_legacy_urls(fm.get("legacy_urls")),
            id,
            ..Default::default()
        }
    }
}

/// Rendered value of `key`, or `default` when absent.
fn text_or(fm: &Frontmatter, key: &str, default: &str) -> String {
    fm.get_rendered(key).unwrap_or_else(|| default.to_string())
}

/// Rendered value of the first present key, or empty.
fn first_text(fm: &Frontmatter, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| fm.get_rendered(key))
        .unwrap_or_default()
}

/// Turn categories into a comma-joined list of taxonomy tags.
///
/// Accepts a list of strings or a comma-separated string, optionally wrapped
/// in `[...]`, with tokens optionally quoted. Non-string list items are
/// skipped and empty tokens dropped. The result is not deduplicated.
///
/// ```
/// use sfguide_content::fields::FieldValue;
/// use sfguide_content::normalize::normalize_categories;
/// use sfguide_core::Taxonomy;
///
/// let value = FieldValue::Text("Data Science, AI/ML".into());
/// assert_eq!(
///     normalize_categories(Some(&value), &Taxonomy::default()),
///     "snowflake-site:taxonomy/guide-category/data-science,\
///      snowflake-site:taxonomy/guide-category/ai/ml"
/// );
/// ```
pub fn normalize_categories(value: Option<&FieldValue>, taxonomy: &Taxonomy) -> String {
    let tags: Vec<String> = match value {
        Some(FieldValue::List(items)) => items
            .iter()
            .filter_map(FieldValue::as_text)
            .filter_map(|cat| taxonomy.category_tag(cat))
            .collect(),
        Some(FieldValue::Text(s)) => {
            let trimmed = s.trim();
            let inner = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .unwrap_or(trimmed);
            inner
                .split(',')
                .map(|cat| cat.trim().trim_matches(['"', '\'']))
                .filter_map(|cat| taxonomy.category_tag(cat))
                .collect()
        }
        _ => Vec::new(),
    };
    tags.join(",")
}

/// Bare integers gain a `" minutes"` suffix; anything else passes through.
pub fn normalize_duration(value: Option<&FieldValue>) -> String {
    match value {
        Some(FieldValue::Integer(minutes)) => format!("{minutes} minutes"),
        Some(other) => other.render(),
        None => String::new(),
    }
}

/// Legacy URLs as `{url}` records.
///
/// A string is split on commas; a list contributes one entry per item.
/// Blank entries are dropped.
pub fn normalize_legacy_urls(value: Option<&FieldValue>) -> Vec<LegacyUrl> {
    let urls: Vec<String> = match value {
        Some(FieldValue::Text(s)) => s.split(',').map(str::to_string).collect(),
        Some(FieldValue::List(items)) => items.iter().map(FieldValue::render).collect(),
        Some(other) => vec![other.render()],
        None => Vec::new(),
    };
    urls.into_iter()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .map(|url| LegacyUrl { url })
        .collect()
}
