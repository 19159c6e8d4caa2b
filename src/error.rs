use std::path::PathBuf;

/// Result type alias for per-file scanning operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors that can occur while reading, parsing or extracting a single file
#[derive(Debug)]
pub enum ScanError {
    Io {
        file: PathBuf,
        source: std::io::Error,
    },
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    MalformedRoute {
        file: PathBuf,
        line: usize,
        message: String,
    },
}

impl ScanError {
    /// Path of the file this error belongs to
    pub fn file(&self) -> &PathBuf {
        match self {
            ScanError::Io { file, .. } => file,
            ScanError::Parse { file, .. } => file,
            ScanError::MalformedRoute { file, .. } => file,
        }
    }
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ScanError::Io { file, source } => {
                write!(f, "IO error in {}: {}", file.display(), source)
            }
            ScanError::Parse {
                file,
                line,
                column,
                message,
            } => write!(
                f,
                "Parse error in {} at {}:{}: {}",
                file.display(),
                line,
                column,
                message
            ),
            ScanError::MalformedRoute {
                file,
                line,
                message,
            } => write!(
                f,
                "Malformed route in {} at line {}: {}",
                file.display(),
                line,
                message
            ),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl serde::Serialize for ScanError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
