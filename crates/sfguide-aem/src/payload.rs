//! Content-fragment and page payloads.
//!
//! A parsed quickstart becomes two Sling POST bodies: one updating the
//! content fragment that stores the article, one updating the page that
//! renders it. They share the validated tag list and the title; every other
//! field belongs to exactly one of them.

use serde::{Deserialize, Serialize};
use sfguide_content::ParsedRecord;
use sfguide_core::clock::midnight_timestamp;
use sfguide_core::{Clock, LinkTemplate, Result, Taxonomy};

use crate::form::FormData;
use crate::tags::TagValidator;

/// Sling field paths used in the content-fragment payload.
pub mod fragment_fields {
    /// Multi-valued article tags.
    pub const TAGS: &str = "./data/master/quickstartArticleTags";
    /// Node title.
    pub const JCR_TITLE: &str = "./jcr:title";
    /// Article title.
    pub const TITLE: &str = "./data/master/quickstartArticleTitle";
    /// Article slug (the quickstart id).
    pub const SLUG: &str = "./data/master/quickstartArticleSlug";
    /// Fork-the-repo link.
    pub const FORK_REPO_LINK: &str = "./data/master/quickstartArticleForkRepoLink";
    /// Open-in-Snowflake link.
    pub const OPEN_IN_SNOWFLAKE_LINK: &str = "./data/master/quickstartArticleOpenInSnowflakeLink";
    /// Author; may be sent twice (combined authors, then single author).
    pub const AUTHOR: &str = "./data/master/quickstartArticleAuthor";
    /// Summary.
    pub const SUMMARY: &str = "./data/master/quickstartArticleSummary";
    /// Markdown body.
    pub const BODY: &str = "./data/master/quickstartArticleBody";
    /// Last-modified timestamp.
    pub const LAST_MODIFIED: &str = "./jcr:lastModified";
}

/// Sling field paths used in the page payload.
pub mod page_fields {
    /// Multi-valued page tags.
    pub const TAGS: &str = "./jcr:content/cq:tags";
    /// Path of the content fragment the page renders.
    pub const FRAGMENT_PATH: &str = "./jcr:content/quickStartFragmentPath";
    /// Page title.
    pub const TITLE: &str = "./jcr:content/jcr:title";
    /// Publication timestamp.
    pub const PUBLICATION_DATE: &str = "./jcr:content/customPublicationDate";
}

/// Source values for the content-fragment payload.
#[derive(Debug, Clone, Default)]
pub struct FragmentFields<'a> {
    /// Title, sent as both node title and article title.
    pub title: &'a str,
    /// Quickstart id.
    pub slug: &'a str,
    /// Markdown body.
    pub body: &'a str,
    /// Summary.
    pub summary: &'a str,
    /// Single author.
    pub author: &'a str,
    /// Combined authors.
    pub authors: &'a str,
    /// Fork-the-repo link.
    pub fork_repo_link: &'a str,
    /// Open-in-Snowflake link.
    pub open_in_snowflake_link: &'a str,
}

/// Build the content-fragment form.
///
/// The tag type hint is always sent, so an empty tag list clears the field.
/// Other fields are omitted when their source is empty. When both `authors`
/// and `author` are set the author field is sent twice, combined authors
/// first; how duplicates resolve is up to the receiving server.
pub fn build_content_fragment_form(
    fields: &FragmentFields<'_>,
    tags: &[String],
    clock: &dyn Clock,
) -> FormData {
    use self::fragment_fields as f;

    let mut form = FormData::new();
    form.push_string_array(f::TAGS, tags);
    form.push_non_empty(f::JCR_TITLE, fields.title);
    form.push_non_empty(f::TITLE, fields.title);
    form.push_non_empty(f::SLUG, fields.slug);
    form.push_non_empty(f::FORK_REPO_LINK, fields.fork_repo_link);
    form.push_non_empty(f::OPEN_IN_SNOWFLAKE_LINK, fields.open_in_snowflake_link);
    form.push_non_empty(f::AUTHOR, fields.authors);
    form.push_non_empty(f::AUTHOR, fields.author);
    form.push_non_empty(f::SUMMARY, fields.summary);
    form.push_non_empty(f::BODY, fields.body);
    form.push(f::LAST_MODIFIED, midnight_timestamp(clock));
    form
}

/// Build the page form.
pub fn build_page_form(
    title: &str,
    content_fragment_path: &str,
    tags: &[String],
    clock: &dyn Clock,
) -> FormData {
    use self::page_fields as p;

    let mut form = FormData::new();
    form.push_string_array(p::TAGS, tags);
    form.push_non_empty(p::FRAGMENT_PATH, content_fragment_path);
    form.push_non_empty(p::TITLE, title);
    form.push(p::PUBLICATION_DATE, midnight_timestamp(clock));
    form
}

/// Output of payload preparation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedPayloads {
    /// Encoded content-fragment update.
    pub content_fragment_payload: String,
    /// Encoded page update.
    pub page_payload: String,
    /// Validated, sorted, unique tags.
    pub tags: Vec<String>,
    /// The content-fragment path, echoed back.
    pub content_fragment_path: String,
}

/// Builds both payloads from a parsed record.
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    validator: TagValidator,
    fork_repo: LinkTemplate,
}

impl PayloadBuilder {
    /// Create a builder for the given conventions.
    pub fn new(taxonomy: &Taxonomy, fork_repo: LinkTemplate) -> Result<Self> {
        Ok(Self {
            validator: TagValidator::new(taxonomy)?,
            fork_repo,
        })
    }

    /// Create a builder with default conventions.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&Taxonomy::default(), LinkTemplate::default())
    }

    /// Validate the record's categories once, then build both payloads.
    ///
    /// An empty `fork_repo_link` is synthesized from the record id.
    ///
    /// # Errors
    ///
    /// [`sfguide_core::Error::InvalidTags`] when any category fails the tag
    /// grammar; no payload is built in that case.
    pub fn prepare(
        &self,
        record: &ParsedRecord,
        content_fragment_path: &str,
        clock: &dyn Clock,
    ) -> Result<PreparedPayloads> {
        let tags = self.validator.validate(&record.categories)?;

        let fork_repo_link = if record.fork_repo_link.is_empty() && !record.id.is_empty() {
            self.fork_repo.render(&record.id)
        } else {
            record.fork_repo_link.clone()
        };

        let fields = FragmentFields {
            title: &record.title,
            slug: &record.id,
            body: &record.markdown,
            summary: &record.summary,
            author: &record.author,
            authors: &record.authors,
            fork_repo_link: &fork_repo_link,
            open_in_snowflake_link: &record.open_in_snowflake_link,
        };

        let fragment = build_content_fragment_form(&fields, &tags, clock);
        let page = build_page_form(&record.title, content_fragment_path, &tags, clock);

        log::debug!(
            "Prepared payloads for {} ({} tag(s), {} fragment field(s), {} page field(s))",
            record.id,
            tags.len(),
            fragment.len(),
            page.len()
        );

        Ok(PreparedPayloads {
            content_fragment_payload: fragment.encode(),
            page_payload: page.encode(),
            tags,
            content_fragment_path: content_fragment_path.to_string(),
        })
    }
}

/// Prepare payloads with default conventions.
pub fn prepare_payloads(
    record: &ParsedRecord,
    content_fragment_path: &str,
    clock: &dyn Clock,
) -> Result<PreparedPayloads> {
    PayloadBuilder::with_defaults()?.prepare(record, content_fragment_path, clock)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sfguide_core::{Error, FixedClock};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 13, 30, 0).unwrap())
    }

    fn tags() -> Vec<String> {
        vec!["snowflake-site:taxonomy/guide-category/ai".to_string()]
    }

    // ------------------------------------------------------------------------
    // Content fragment form
    // ------------------------------------------------------------------------

    #[test]
    fn test_fragment_form_order() {
        let fields = FragmentFields {
            title: "Demo",
            slug: "demo",
            body: "Body",
            summary: "Sum",
            author: "Ada",
            authors: "Ada, Grace",
            fork_repo_link: "https://fork",
            open_in_snowflake_link: "https://open",
        };
        let form = build_content_fragment_form(&fields, &tags(), &clock());
        let keys: Vec<&str> = form.fields().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "./data/master/quickstartArticleTags@TypeHint",
                fragment_fields::TAGS,
                fragment_fields::JCR_TITLE,
                fragment_fields::TITLE,
                fragment_fields::SLUG,
                fragment_fields::FORK_REPO_LINK,
                fragment_fields::OPEN_IN_SNOWFLAKE_LINK,
                fragment_fields::AUTHOR,
                fragment_fields::AUTHOR,
                fragment_fields::SUMMARY,
                fragment_fields::BODY,
                fragment_fields::LAST_MODIFIED,
            ]
        );
        assert_eq!(
            form.values(fragment_fields::AUTHOR).collect::<Vec<_>>(),
            vec!["Ada, Grace", "Ada"]
        );
    }

    #[test]
    fn test_fragment_form_omits_empty_fields() {
        let form = build_content_fragment_form(&FragmentFields::default(), &[], &clock());
        let encoded = form.encode();

        assert_eq!(
            encoded,
            "./data/master/quickstartArticleTags%40TypeHint=String%5B%5D\
             &./jcr:lastModified=2025-06-01T00:00:00.000Z"
        );
    }

    #[test]
    fn test_fragment_form_single_author_only() {
        let fields = FragmentFields {
            author: "Ada",
            ..Default::default()
        };
        let form = build_content_fragment_form(&fields, &[], &clock());
        assert_eq!(
            form.values(fragment_fields::AUTHOR).collect::<Vec<_>>(),
            vec!["Ada"]
        );
    }

    // ------------------------------------------------------------------------
    // Page form
    // ------------------------------------------------------------------------

    #[test]
    fn test_page_form() {
        let form = build_page_form("Demo", "/content/dam/guides/demo", &tags(), &clock());
        assert_eq!(
            form.encode(),
            "./jcr:content/cq:tags%40TypeHint=String%5B%5D\
             &./jcr:content/cq:tags=snowflake-site:taxonomy/guide-category/ai\
             &./jcr:content/quickStartFragmentPath=/content/dam/guides/demo\
             &./jcr:content/jcr:title=Demo\
             &./jcr:content/customPublicationDate=2025-06-01T00:00:00.000Z"
        );
    }

    #[test]
    fn test_page_form_without_path_or_title() {
        let form = build_page_form("", "", &[], &clock());
        assert!(!form.contains_key(page_fields::FRAGMENT_PATH));
        assert!(!form.contains_key(page_fields::TITLE));
        assert!(form.contains_key(page_fields::PUBLICATION_DATE));
    }

    // ------------------------------------------------------------------------
    // prepare
    // ------------------------------------------------------------------------

    #[test]
    fn test_prepare_synthesizes_fork_link() {
        let record = ParsedRecord {
            id: "demo".to_string(),
            ..Default::default()
        };
        let out = prepare_payloads(&record, "", &clock()).unwrap();
        assert!(out.content_fragment_payload.contains(
            "quickstartArticleForkRepoLink=https://github.com/Snowflake-Labs/sfquickstarts/tree/master/site/sfguides/src/demo"
        ));
        assert!(out.tags.is_empty());
        assert_eq!(out.content_fragment_path, "");
    }

    #[test]
    fn test_prepare_no_fork_link_without_id() {
        let out = prepare_payloads(&ParsedRecord::default(), "", &clock()).unwrap();
        assert!(!out.content_fragment_payload.contains("ForkRepoLink"));
    }

    #[test]
    fn test_prepare_invalid_tags_builds_nothing() {
        let record = ParsedRecord {
            categories: "snowflake-site:taxonomy,not a tag".to_string(),
            ..Default::default()
        };
        let err = prepare_payloads(&record, "/p", &clock()).unwrap_err();
        match err {
            Error::InvalidTags { tags, .. } => {
                assert_eq!(tags, vec!["snowflake-site:taxonomy", "not a tag"]);
            }
            other => panic!("expected InvalidTags, got {other:?}"),
        }
    }

    #[test]
    fn test_prepare_shares_tags_between_payloads() {
        let record = ParsedRecord {
            id: "demo".to_string(),
            title: "Demo".to_string(),
            categories: "snowflake-site:taxonomy/b,snowflake-site:taxonomy/a,snowflake-site:taxonomy/b"
                .to_string(),
            ..Default::default()
        };
        let out = prepare_payloads(&record, "/content/dam/demo", &clock()).unwrap();

        assert_eq!(
            out.tags,
            vec!["snowflake-site:taxonomy/a", "snowflake-site:taxonomy/b"]
        );
        assert!(out.content_fragment_payload.contains(
            "./data/master/quickstartArticleTags=snowflake-site:taxonomy/a\
             &./data/master/quickstartArticleTags=snowflake-site:taxonomy/b"
        ));
        assert!(out.page_payload.contains(
            "./jcr:content/cq:tags=snowflake-site:taxonomy/a\
             &./jcr:content/cq:tags=snowflake-site:taxonomy/b"
        ));
        assert!(out.page_payload.contains("./jcr:content/jcr:title=Demo"));
    }
}
