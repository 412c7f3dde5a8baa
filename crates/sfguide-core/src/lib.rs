//! Sfguide Core: shared types, errors, and site conventions.
//!
//! This crate provides the foundational types used by every sfguide crate.
//! It has no internal dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error type and Result alias
//! - [`taxonomy`]: Tag root, category namespace, and tag grammar
//! - [`links`]: URL templates keyed by quickstart id
//! - [`clock`]: Current-time accessor for payload timestamps

pub mod clock;
pub mod error;
pub mod links;
pub mod taxonomy;

// Re-export key types at crate root for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use links::LinkTemplate;
pub use taxonomy::Taxonomy;
