//! Error types for sfguide staging.
//!
//! A single `Error` type and `Result<T>` alias shared by every sfguide crate.
//! Only two variants describe problems with the *input*: a document without a
//! metadata block ([`Error::MissingFrontmatter`]) and category tags outside the
//! taxonomy grammar ([`Error::InvalidTags`]). Everything else is plumbing.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while staging a quickstart.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The document has no discoverable frontmatter block.
    #[error("YAML frontmatter not found at top of markdown")]
    MissingFrontmatter,

    /// One or more tags fail the taxonomy grammar.
    ///
    /// Carries every offending token so a caller can fix them in one pass.
    #[error(
        "Invalid tag format(s): {}. Tags must match '{root}/<subpath>' with at least \
         one subfolder and only letters, numbers, underscores, or hyphens per segment.",
        tags.join(", ")
    )]
    InvalidTags {
        /// The tokens that failed validation, in input order.
        tags: Vec<String>,
        /// Taxonomy root every tag must start with.
        root: String,
    },

    /// A frontmatter parser strategy could not read the block.
    #[error("Frontmatter parse error: {0}")]
    Parse(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error tied to a specific file.
    #[error("I/O error on {}: {source}", path.display())]
    IoPath {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// I/O error without a path (stdin, stdout).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid-tags error.
    pub fn invalid_tags(tags: Vec<String>, root: impl Into<String>) -> Self {
        Self::InvalidTags {
            tags,
            root: root.into(),
        }
    }

    /// Wrap an I/O error with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns whether this error is caused by the source document or its
    /// taxonomy rather than by the system.
    pub fn is_user_input(&self) -> bool {
        match self {
            Error::MissingFrontmatter | Error::InvalidTags { .. } => true,
            Error::Parse(_)
            | Error::Config(_)
            | Error::IoPath { .. }
            | Error::Io(_)
            | Error::Json(_) => false,
        }
    }
}

/// Result type alias using the sfguide `Error` type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_tags_message_lists_every_token() {
        let err = Error::invalid_tags(
            vec!["bad one".to_string(), "snowflake-site:taxonomy".to_string()],
            "snowflake-site:taxonomy",
        );
        let msg = err.to_string();
        assert!(msg.contains("bad one, snowflake-site:taxonomy"));
        assert!(msg.contains("'snowflake-site:taxonomy/<subpath>'"));
    }

    #[test]
    fn test_user_input_classification() {
        assert!(Error::MissingFrontmatter.is_user_input());
        assert!(Error::invalid_tags(vec![], "root").is_user_input());
        assert!(!Error::parse("bad yaml").is_user_input());
        assert!(!Error::config("missing").is_user_input());
    }

    #[test]
    fn test_io_with_path_display() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io_with_path(io, "/tmp/guide.md");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/guide.md"));
        assert!(msg.contains("gone"));
    }
}
