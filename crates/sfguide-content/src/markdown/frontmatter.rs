//! Frontmatter extraction from quickstart markdown.
//!
//! Quickstarts normally open with a `---` delimited YAML block:
//!
//! ```markdown
//! ---
//! id: getting-started
//! title: Getting Started
//! categories: [Data Science]
//! ---
//!
//! ## Overview
//! ```
//!
//! Older guides instead put `key: value` lines at the top and separate them
//! from the body with a blank line. Both layouts are accepted; a document with
//! neither fails with [`Error::MissingFrontmatter`].
//!
//! The block itself is read by a chain of [`FrontmatterParser`] strategies:
//! the preferred structured parser ([`YamlParser`] by default) runs first and
//! the manual [`LineParser`] takes over whenever it fails.
//!
//! # Usage
//!
//! ```rust
//! use sfguide_content::markdown::extract_frontmatter;
//!
//! let content = "---\ntitle: Test\n---\nBody";
//! let result = extract_frontmatter(content).unwrap();
//!
//! assert_eq!(result.get_str("title"), Some("Test"));
//! assert_eq!(result.body(), "Body");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use sfguide_core::{Error, Result};

use crate::fields::{FieldValue, Frontmatter};

static DELIMITED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A\s*---\s*\n(.*?)\n---\s*(?:\n|$)").expect("Invalid frontmatter regex")
});

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("Invalid blank line regex"));

// ============================================================================
// Parser strategies
// ============================================================================

/// A strategy for turning a raw frontmatter block into a [`Frontmatter`].
pub trait FrontmatterParser: Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Parse the text between the delimiters.
    fn parse(&self, block: &str) -> Result<Frontmatter>;
}

/// Structured YAML parsing via `serde_yaml`.
///
/// Fails on malformed YAML and on documents that are not a mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl FrontmatterParser for YamlParser {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn parse(&self, block: &str) -> Result<Frontmatter> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(block).map_err(|e| Error::parse(e.to_string()))?;
        Frontmatter::from_yaml(&value)
            .ok_or_else(|| Error::parse("frontmatter is not a key/value mapping"))
    }
}

/// Manual line-oriented parser for simple `key: value` blocks.
///
/// An unindented line containing a colon starts a new key (text before the
/// first colon, trimmed). Every following line up to the next such line is
/// appended to that key's value; the collected lines are newline-joined and
/// trimmed. Lines before the first key are ignored. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineParser;

impl LineParser {
    /// Parse a block into text-valued fields.
    pub fn parse_lines(block: &str) -> Frontmatter {
        let mut fm = Frontmatter::new();
        let mut current: Option<(String, Vec<&str>)> = None;

        for line in block.split('\n') {
            let indented = line.starts_with(' ') || line.starts_with('\t');
            match line.split_once(':') {
                Some((key, value)) if !indented => {
                    if let Some((key, lines)) = current.take() {
                        fm.insert(key, FieldValue::Text(lines.join("\n").trim().to_string()));
                    }
                    current = Some((key.trim().to_string(), vec![value.trim()]));
                }
                _ => {
                    if let Some((_, lines)) = current.as_mut() {
                        lines.push(line);
                    }
                }
            }
        }

        if let Some((key, lines)) = current {
            fm.insert(key, FieldValue::Text(lines.join("\n").trim().to_string()));
        }
        fm
    }
}

impl FrontmatterParser for LineParser {
    fn name(&self) -> &'static str {
        "line"
    }

    fn parse(&self, block: &str) -> Result<Frontmatter> {
        Ok(Self::parse_lines(block))
    }
}

// ============================================================================
// Extraction result
// ============================================================================

/// How the frontmatter block was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLayout {
    /// Enclosed in `---` lines.
    Delimited,
    /// Everything up to the first blank line.
    LeadingParagraph,
}

/// Result of frontmatter extraction.
#[derive(Debug, Clone)]
pub struct FrontmatterResult<'a> {
    frontmatter: Frontmatter,
    body: &'a str,
    layout: BlockLayout,
    parser: &'static str,
}

impl<'a> FrontmatterResult<'a> {
    /// The parsed fields.
    pub fn frontmatter(&self) -> &Frontmatter {
        &self.frontmatter
    }

    /// Take ownership of the parsed fields.
    pub fn into_frontmatter(self) -> Frontmatter {
        self.frontmatter
    }

    /// Body content (everything after the block).
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// How the block was located.
    pub fn layout(&self) -> BlockLayout {
        self.layout
    }

    /// Name of the parser strategy that produced the fields.
    pub fn parser(&self) -> &'static str {
        self.parser
    }

    /// Split into fields and body.
    pub fn into_parts(self) -> (Frontmatter, &'a str) {
        (self.frontmatter, self.body)
    }

    /// Get a string field.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.frontmatter.get(key)?.as_text()
    }
}

// ============================================================================
// Extractor
// ============================================================================

/// Locates the frontmatter block and runs the parser chain over it.
pub struct FrontmatterExtractor {
    preferred: Option<Box<dyn FrontmatterParser>>,
}

impl Default for FrontmatterExtractor {
    fn default() -> Self {
        Self::with_parser(YamlParser)
    }
}

impl std::fmt::Debug for FrontmatterExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrontmatterExtractor")
            .field("preferred", &self.preferred.as_ref().map(|p| p.name()))
            .finish()
    }
}

impl FrontmatterExtractor {
    /// Use `parser` first, falling back to [`LineParser`] when it fails.
    pub fn with_parser(parser: impl FrontmatterParser + 'static) -> Self {
        Self {
            preferred: Some(Box::new(parser)),
        }
    }

    /// Use only the manual line parser.
    pub fn line_only() -> Self {
        Self { preferred: None }
    }

    /// Split `content` into frontmatter and body.
    ///
    /// A leading byte-order mark is ignored. Fails only when the document has
    /// neither a `---` delimited block nor a blank line ending a leading
    /// paragraph; parse failures of the preferred parser are absorbed.
    ///
    /// Whitespace-only lines directly after the closing `---` belong to the
    /// delimiter, so the body starts at its first line with visible content.
    /// Indentation on that line is kept.
    pub fn extract<'a>(&self, content: &'a str) -> Result<FrontmatterResult<'a>> {
        let text = content.trim_start_matches('\u{feff}');

        let (block, body, layout) = if let Some(caps) = DELIMITED_BLOCK.captures(text) {
            let whole = caps.get(0).map_or(0, |m| m.end());
            let block = caps.get(1).map_or("", |m| m.as_str());
            (block, &text[whole..], BlockLayout::Delimited)
        } else if let Some(sep) = BLANK_LINE.find(text) {
            log::warn!("No `---` frontmatter delimiters; using leading paragraph as frontmatter");
            (
                text[..sep.start()].trim(),
                &text[sep.end()..],
                BlockLayout::LeadingParagraph,
            )
        } else {
            return Err(Error::MissingFrontmatter);
        };

        let (frontmatter, parser) = self.parse_block(block);
        log::debug!(
            "Extracted {} frontmatter field(s) with the {parser} parser",
            frontmatter.len()
        );

        Ok(FrontmatterResult {
            frontmatter,
            body,
            layout,
            parser,
        })
    }

    fn parse_block(&self, block: &str) -> (Frontmatter, &'static str) {
        if let Some(parser) = &self.preferred {
            match parser.parse(block) {
                Ok(fm) => return (fm, parser.name()),
                Err(e) => log::warn!(
                    "{} frontmatter parser failed, falling back to line parser: {e}",
                    parser.name()
                ),
            }
        }
        (LineParser::parse_lines(block), LineParser.name())
    }
}

/// Extract frontmatter with the default parser chain.
///
/// # Example
///
/// ```rust
/// use sfguide_content::markdown::{extract_frontmatter, BlockLayout};
///
/// // Delimited block
/// let result = extract_frontmatter("---\nid: demo\n---\n# Heading").unwrap();
/// assert_eq!(result.get_str("id"), Some("demo"));
/// assert_eq!(result.body(), "# Heading");
///
/// // Leading paragraph
/// let result = extract_frontmatter("id: demo\n\n# Heading").unwrap();
/// assert_eq!(result.layout(), BlockLayout::LeadingParagraph);
/// assert_eq!(result.body(), "# Heading");
///
/// // Neither
/// assert!(extract_frontmatter("# Just markdown").is_err());
/// ```
pub fn extract_frontmatter(content: &str) -> Result<FrontmatterResult<'_>> {
    FrontmatterExtractor::default().extract(content)
}

// ============================================================================
// Tests
// ============================================================================
