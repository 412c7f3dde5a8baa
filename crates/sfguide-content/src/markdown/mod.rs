//! Markdown-level processing: frontmatter extraction and image rewriting.
//!
//! - [`frontmatter`]: locate and parse the metadata block
//! - [`images`]: make relative image references absolute
//!
//! Neither module interprets markdown beyond frontmatter delimiters and image
//! syntax; the body is otherwise treated as opaque text.

pub mod frontmatter;
pub mod images;

// Re-export key types and functions
pub use frontmatter::{
    BlockLayout, FrontmatterExtractor, FrontmatterParser, FrontmatterResult, LineParser,
    YamlParser, extract_frontmatter,
};
pub use images::{ImageRewrite, rewrite_image_urls};
