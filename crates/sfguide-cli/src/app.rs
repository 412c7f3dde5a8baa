//! Command dispatch for the `sfguide` binary.
//!
//! stdout carries only JSON (or the value asked for by `config get`);
//! status messages and logs go to stderr.

use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;
use sfguide_aem::{PayloadBuilder, PreparedPayloads};
use sfguide_content::ParsedRecord;
use sfguide_core::{Clock, Error, Result, SystemClock};
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command, ParseArgs, PrepareArgs};
use crate::config::StagingConfig;
use crate::config_handlers;

/// Reads from stdin when given as the `prepare` input.
pub const STDIN_MARKER: &str = "-";

/// Initialise tracing-based logging on stderr.
///
/// Uses `RUST_LOG` if set, otherwise defaults based on verbosity flags.
/// `log` records from the library crates are forwarded to the subscriber.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // A subscriber may already be installed (e.g. in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run one CLI invocation.
pub fn run(args: CliArgs) -> Result<()> {
    init_logging(args.verbose, args.quiet);
    let config_path = args.config.as_deref();

    match args.command {
        Command::Parse(parse) => {
            let config = StagingConfig::load(config_path)?;
            let record = parse_file(&config, &parse)?;
            write_json(&record, parse.output_json.as_deref())?;
            tracing::info!(
                "Parsed {} ({} image(s) rewritten)",
                record.id,
                record.images_replaced_count
            );
            Ok(())
        }
        Command::Prepare(prepare) => {
            let config = StagingConfig::load(config_path)?;
            let payloads = prepare_input(&config, &prepare, &SystemClock)?;
            write_json(&payloads, prepare.output_json.as_deref())?;
            tracing::info!(
                "Prepared payloads for {} with {} tag(s)",
                payloads.content_fragment_path,
                payloads.tags.len()
            );
            Ok(())
        }
        Command::Version => {
            println!("sfguide {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Config(config_cmd) => {
            config_handlers::handle_config_command(config_path, config_cmd.command)
        }
    }
}

/// Stage one: read a markdown file and parse it into a record.
pub fn parse_file(config: &StagingConfig, args: &ParseArgs) -> Result<ParsedRecord> {
    let text = std::fs::read_to_string(&args.file).map_err(|e| Error::io_with_path(e, &args.file))?;
    config
        .document_parser(args.base_image_url.as_deref())
        .parse(&text, &args.commit_sha, &args.quickstart_name)
}

/// Stage two: read a record from a file or stdin and build both payloads.
pub fn prepare_input(
    config: &StagingConfig,
    args: &PrepareArgs,
    clock: &dyn Clock,
) -> Result<PreparedPayloads> {
    let json = read_input(&args.input)?;
    let record: ParsedRecord = serde_json::from_str(&json)?;
    PayloadBuilder::new(&config.taxonomy, config.links.fork_repo_template.clone())?.prepare(
        &record,
        &args.content_fragment_path,
        clock,
    )
}

/// Read a whole file, or stdin for [`STDIN_MARKER`].
pub fn read_input(input: &str) -> Result<String> {
    if input == STDIN_MARKER {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).map_err(|e| Error::io_with_path(e, input))
}

/// Write pretty JSON to `output`, or to stdout when `None`.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n")).map_err(|e| Error::io_with_path(e, path))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
