//! README generator - Command-line tool for documenting Python projects.
//!
//! This binary scans a Python project, extracts its top-level functions, classes and
//! Flask routes, and writes a README.md built from them plus a few answers from the
//! operator.
//!
//! # Usage
//!
//! ```bash
//! readme-from-source [OPTIONS] [PROJECT_PATH]
//! ```
//!
//! # Examples
//!
//! Generate a README interactively for the current directory:
//! ```bash
//! readme-from-source
//! ```
//!
//! Generate an English README without prompts and dump the metadata as JSON:
//! ```bash
//! readme-from-source ./my-app -l en -s completed --no-prompt -m json
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! readme-from-source ./my-app -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use readme_from_source::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("README generator starting...");

    let args = cli::parse_args_from_parsed(args)?;

    cli::run(args)?;

    info!("README generation completed successfully");

    Ok(())
}
