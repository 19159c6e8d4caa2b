//! Extension-to-language classification.

use crate::scanner::FileScanner;
use anyhow::Result;
use log::debug;
use std::path::Path;

const EXTENSION_LANGUAGES: &[(&str, &str)] = &[
    ("py", "Python"),
    ("js", "JavaScript"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("java", "Java"),
];

/// Maps a file extension (without the dot, any case) to a language label.
pub fn language_for_extension(extension: &str) -> Option<&'static str> {
    let extension = extension.to_ascii_lowercase();
    EXTENSION_LANGUAGES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, language)| *language)
}

/// Language label of a file path, if its extension is known.
pub fn language_for_path(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(language_for_extension)
}

/// Distinct languages of all scanned files, in first-seen walk order.
pub fn detect_languages(scanner: &FileScanner) -> Result<Vec<&'static str>> {
    let walk = scanner.scan_all()?;

    let mut languages: Vec<&'static str> = Vec::new();
    for language in walk.files.iter().filter_map(|path| language_for_path(path)) {
        if !languages.contains(&language) {
            languages.push(language);
        }
    }

    debug!("Detected languages: {:?}", languages);
    Ok(languages)
}
