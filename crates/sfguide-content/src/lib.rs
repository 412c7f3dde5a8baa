//! Quickstart markdown parsing: stage one of sfguide staging.
//!
//! Turns a raw quickstart document into a flat [`ParsedRecord`]:
//!
//! 1. [`markdown::frontmatter`] splits the metadata block from the body,
//!    trying a structured YAML parser first and a manual line parser second.
//! 2. [`normalize`] coerces each metadata field into its canonical string form
//!    and turns categories into taxonomy tags.
//! 3. [`markdown::images`] rewrites relative image references in the body to
//!    absolute URLs.
//!
//! Steps 2 and 3 are independent of each other. The record is plain data and
//! serializes to the JSON consumed by payload preparation.
//!
//! # Example
//!
//! ```rust
//! use sfguide_content::parse_markdown;
//!
//! let doc = "---\nid: demo\ntitle: Demo\ncategories: [Data Science]\n---\n![x](a.png)";
//! let record = parse_markdown(doc, "abc123", "demo", "https://cdn/x").unwrap();
//!
//! assert_eq!(
//!     record.categories,
//!     "snowflake-site:taxonomy/guide-category/data-science"
//! );
//! assert_eq!(record.images_replaced_count, 1);
//! ```

pub mod document;
pub mod fields;
pub mod markdown;
pub mod normalize;
pub mod record;

// Re-export commonly used types
pub use document::{DEFAULT_BASE_IMAGE_URL, DocumentParser, parse_markdown};
pub use fields::{FieldValue, Frontmatter};
pub use markdown::{FrontmatterExtractor, extract_frontmatter, rewrite_image_urls};
pub use normalize::FieldNormalizer;
pub use record::{LegacyUrl, ParsedRecord};
