//! sfguide CLI
//!
//! Stages quickstart guides for AEM.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use sfguide_cli::CliArgs;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<()> {
    let args = CliArgs::parse();
    sfguide_cli::run(args)?;
    Ok(())
}
