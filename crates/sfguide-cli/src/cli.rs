//! CLI argument parsing and command definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Stage quickstart guides for AEM.
#[derive(Parser, Debug)]
#[command(name = "sfguide", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "SFGUIDE_CONFIG", global = true)]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a quickstart markdown file into a record.
    Parse(ParseArgs),

    /// Validate tags and build AEM payloads from a parsed record.
    Prepare(PrepareArgs),

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Arguments for `sfguide parse`.
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Markdown file to parse.
    pub file: PathBuf,

    /// Commit SHA the file was read at.
    #[arg(long)]
    pub commit_sha: String,

    /// Quickstart folder name.
    #[arg(long)]
    pub quickstart_name: String,

    /// Base URL for rewritten images. Overrides `images.base_url`.
    #[arg(long)]
    pub base_image_url: Option<String>,

    /// Write the record here instead of stdout.
    #[arg(long)]
    pub output_json: Option<PathBuf>,
}

/// Arguments for `sfguide prepare`.
#[derive(Parser, Debug)]
pub struct PrepareArgs {
    /// Parsed record JSON, or `-` for stdin.
    pub input: String,

    /// AEM content-fragment path the page points at.
    #[arg(long)]
    pub content_fragment_path: String,

    /// Write the payloads here instead of stdout.
    #[arg(long)]
    pub output_json: Option<PathBuf>,
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "taxonomy.root").
        key: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
