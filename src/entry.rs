//! Entry-point detection: the first file that starts the server, and its port.

use crate::project::{FileScan, ProjectScanner};
use crate::scanner::FileScanner;
use anyhow::Result;
use log::debug;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// `run(` followed on the same line by a `port=<digits>` argument
static RE_SERVE_PORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\brun\(.*?\bport\s*=\s*(\d+)").unwrap());

/// The detected entry file and the port it binds, when recoverable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryPoint {
    /// Path of the entry file relative to the project root, `/`-separated
    pub file: Option<String>,
    /// Port literal as written in the source
    pub port: Option<String>,
}

pub struct EntryPointLocator;

impl EntryPointLocator {
    /// Scans the project and locates its entry point.
    ///
    /// Files that fail to parse are skipped.
    pub fn locate(scanner: &FileScanner) -> Result<EntryPoint> {
        let (files, _failures) = ProjectScanner::new(scanner.clone()).scan_files()?;
        Ok(Self::locate_in(&files))
    }

    /// Locates the entry point among already extracted files.
    ///
    /// The first file in walk order with a serve-call wins; any later serve-call file is
    /// ignored.
    pub fn locate_in(files: &[FileScan]) -> EntryPoint {
        let Some(entry) = files.iter().find(|f| f.declarations.has_serve_call) else {
            debug!("No serve call found");
            return EntryPoint::default();
        };

        let port = find_port(&entry.source);
        debug!(
            "Entry file: {} (port: {:?})",
            entry.relative_path, port
        );

        EntryPoint {
            file: Some(entry.relative_path.clone()),
            port,
        }
    }
}

/// First `port=<digits>` that follows a `run(` on the same line.
pub fn find_port(source: &str) -> Option<String> {
    RE_SERVE_PORT
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
