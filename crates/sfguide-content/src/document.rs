//! Stage one: raw quickstart markdown to [`ParsedRecord`].

use sfguide_core::{LinkTemplate, Result, Taxonomy};

use crate::markdown::{FrontmatterExtractor, rewrite_image_urls};
use crate::normalize::FieldNormalizer;
use crate::record::ParsedRecord;

/// Default base URL for hosted guide images.
pub const DEFAULT_BASE_IMAGE_URL: &str =
    "https://raw.githubusercontent.com/Snowflake-Labs/sfquickstarts/master/site/sfguides/src";

/// Parses quickstart documents.
///
/// Holds no per-document state, so one parser can be shared across threads.
#[derive(Debug)]
pub struct DocumentParser {
    extractor: FrontmatterExtractor,
    normalizer: FieldNormalizer,
    base_image_url: String,
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_IMAGE_URL)
    }
}

impl DocumentParser {
    /// Create a parser that rewrites images against `base_image_url`.
    pub fn new(base_image_url: impl Into<String>) -> Self {
        Self {
            extractor: FrontmatterExtractor::default(),
            normalizer: FieldNormalizer::default(),
            base_image_url: base_image_url.into(),
        }
    }

    /// Use a different frontmatter extractor.
    pub fn with_extractor(mut self, extractor: FrontmatterExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Use custom taxonomy and link conventions.
    pub fn with_conventions(mut self, taxonomy: Taxonomy, fork_repo: LinkTemplate) -> Self {
        self.normalizer = FieldNormalizer::new(taxonomy, fork_repo);
        self
    }

    /// Base URL images are rewritten against.
    pub fn base_image_url(&self) -> &str {
        &self.base_image_url
    }

    /// Parse one document.
    ///
    /// `quickstart_name` is the guide's folder name: it is the id fallback
    /// and the path segment images are rewritten under. `commit_sha` is
    /// passed through to the record.
    ///
    /// # Errors
    ///
    /// [`sfguide_core::Error::MissingFrontmatter`] when the document has no
    /// metadata block.
    pub fn parse(
        &self,
        markdown_text: &str,
        commit_sha: &str,
        quickstart_name: &str,
    ) -> Result<ParsedRecord> {
        let (frontmatter, body) = self.extractor.extract(markdown_text)?.into_parts();

        let fields = self.normalizer.normalize(&frontmatter, quickstart_name);
        let images = rewrite_image_urls(body, &self.base_image_url, quickstart_name);

        log::debug!(
            "Parsed quickstart {} ({} image(s) rewritten)",
            fields.id,
            images.replaced
        );

        Ok(ParsedRecord {
            markdown: images.markdown,
            images_replaced_count: images.replaced,
            commit_sha: commit_sha.to_string(),
            quickstart_name: quickstart_name.to_string(),
            ..fields
        })
    }
}

/// Parse a document with default conventions.
///
/// # Example
///
/// ```rust
/// use sfguide_content::parse_markdown;
///
/// let doc = "---\nid: demo\ntitle: Demo\n---\n![x](a.png)";
/// let record = parse_markdown(doc, "abc123", "demo", "https://cdn/x").unwrap();
/// assert_eq!(record.markdown, "![x](https://cdn/x/demo/assets/a.png)");
/// assert_eq!(record.images_replaced_count, 1);
/// ```
pub fn parse_markdown(
    markdown_text: &str,
    commit_sha: &str,
    quickstart_name: &str,
    base_image_url: &str,
) -> Result<ParsedRecord> {
    DocumentParser::new(base_image_url).parse(markdown_text, commit_sha, quickstart_name)
}
