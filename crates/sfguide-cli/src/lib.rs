//! Command-line front end for sfguide staging.
//!
//! Wires the two pipeline stages to files, stdin/stdout, configuration, and
//! logging:
//!
//! ```text
//! sfguide parse guide.md --commit-sha <SHA> --quickstart-name <NAME> > record.json
//! sfguide prepare record.json --content-fragment-path /content/dam/... > payloads.json
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;

pub use app::run;
pub use cli::CliArgs;
pub use config::StagingConfig;
