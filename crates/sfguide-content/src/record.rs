//! The normalized output of stage one.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// A previous URL the quickstart was published under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyUrl {
    /// The old URL.
    pub url: String,
}

/// A parsed quickstart, ready to be persisted as JSON and fed to payload
/// preparation.
///
/// Every metadata field is a plain string (empty when the frontmatter had
/// nothing for it); `legacy_urls` is the only structured field. All fields
/// default, so a partial JSON record deserializes. String fields also accept
/// `null` (read as empty) and numbers or booleans (read as their text), and a
/// `null` URL list is read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedRecord {
    /// Quickstart id (frontmatter `id`, else the quickstart name).
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    /// Title (falls back to the id).
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    /// Summary or description.
    #[serde(deserialize_with = "lenient_string")]
    pub summary: String,
    /// Lowercased language code.
    #[serde(deserialize_with = "lenient_string")]
    pub language: String,
    /// Publication status.
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
    /// Comma-joined category tags, not yet deduplicated.
    #[serde(deserialize_with = "lenient_string")]
    pub categories: String,
    /// Level or difficulty.
    #[serde(deserialize_with = "lenient_string")]
    pub level: String,
    /// Partner name.
    #[serde(deserialize_with = "lenient_string")]
    pub partner: String,
    /// Single author as written in the frontmatter.
    #[serde(deserialize_with = "lenient_string")]
    pub author: String,
    /// All authors, comma-joined.
    #[serde(deserialize_with = "lenient_string")]
    pub authors: String,
    /// Free-form tags, comma-joined.
    #[serde(deserialize_with = "lenient_string")]
    pub tags: String,
    /// Environments, comma-joined.
    #[serde(deserialize_with = "lenient_string")]
    pub environments: String,
    /// Duration, with `" minutes"` appended to bare integers.
    #[serde(deserialize_with = "lenient_string")]
    pub duration: String,
    /// Feedback link.
    #[serde(deserialize_with = "lenient_string")]
    pub feedback_link: String,
    /// Link to fork the guide's source.
    #[serde(deserialize_with = "lenient_string")]
    pub fork_repo_link: String,
    /// "Open in Snowflake" link.
    #[serde(deserialize_with = "lenient_string")]
    pub open_in_snowflake_link: String,
    /// Previous URLs.
    #[serde(deserialize_with = "lenient_list")]
    pub legacy_urls: Vec<LegacyUrl>,
    /// Body with image references rewritten.
    #[serde(deserialize_with = "lenient_string")]
    pub markdown: String,
    /// Number of image references rewritten.
    pub images_replaced_count: usize,
    /// Commit the source was read at.
    #[serde(deserialize_with = "lenient_string")]
    pub commit_sha: String,
    /// Quickstart folder name (the document slug).
    #[serde(deserialize_with = "lenient_string")]
    pub quickstart_name: String,
}

/// Read a string field, accepting `null`, numbers, and booleans.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientString;

    impl<'de> Visitor<'de> for LenientString {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, boolean, or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<String, D2::Error> {
            d.deserialize_any(LenientString)
        }
    }

    deserializer.deserialize_any(LenientString)
}

/// Read a list field, treating `null` as empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
