//! Serialization of scan metadata and writing of the generated document.
//!
//! The metadata dump exposes the same facts the README is rendered from, so other tools
//! can consume them without scraping Markdown.

use crate::project::ScanResult;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes scan metadata to YAML format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml(result: &ScanResult) -> Result<String> {
    debug!("Serializing scan metadata to YAML");
    serde_yaml::to_string(result).context("Failed to serialize scan metadata to YAML")
}

/// Serializes scan metadata to JSON format with pretty printing.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json(result: &ScanResult) -> Result<String> {
    debug!("Serializing scan metadata to JSON");
    serde_json::to_string_pretty(result).context("Failed to serialize scan metadata to JSON")
}

/// Writes string content to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does. Missing parent
/// directories are created.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
