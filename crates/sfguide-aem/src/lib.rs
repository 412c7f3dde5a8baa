//! AEM payload preparation: stage two of sfguide staging.
//!
//! Takes a [`ParsedRecord`](sfguide_content::ParsedRecord) produced by stage
//! one and builds the two Sling POST bodies that publish it:
//!
//! - [`tags`]: validate category tags against the taxonomy grammar
//! - [`form`]: ordered form fields and their URL encoding
//! - [`payload`]: content-fragment and page payloads
//!
//! Tags are validated once and shared by both payloads. Timestamps come from
//! a caller-supplied [`Clock`](sfguide_core::Clock).
//!
//! # Example
//!
//! ```rust
//! use sfguide_aem::prepare_payloads;
//! use sfguide_content::ParsedRecord;
//! use sfguide_core::SystemClock;
//!
//! let record = ParsedRecord {
//!     id: "demo".into(),
//!     title: "Demo".into(),
//!     categories: "snowflake-site:taxonomy/guide-category/data-science".into(),
//!     ..Default::default()
//! };
//! let out = prepare_payloads(&record, "/content/dam/guides/demo", &SystemClock).unwrap();
//!
//! assert!(out.content_fragment_payload.contains("./jcr:title=Demo"));
//! assert_eq!(out.tags.len(), 1);
//! ```

pub mod form;
pub mod payload;
pub mod tags;

// Re-export key types
pub use form::FormData;
pub use payload::{PayloadBuilder, PreparedPayloads, prepare_payloads};
pub use tags::{TagValidator, validate_tags};
