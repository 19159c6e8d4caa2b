use crate::error::{Result, ScanError};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

/// Syntax parser for Python source files.
///
/// The `PythonParser` uses the tree-sitter Python grammar to turn source text into a
/// concrete syntax tree. tree-sitter recovers from syntax errors on its own, so any tree
/// that contains `ERROR` or missing nodes is reported as a parse failure instead of being
/// handed to the extractor half-broken.
///
/// # Example
///
/// ```no_run
/// use readme_from_source::parser::PythonParser;
/// use std::path::Path;
///
/// let parsed = PythonParser::parse_file(Path::new("app.py")).unwrap();
/// println!("Parsed {} top-level statements", parsed.root().named_child_count());
/// ```
pub struct PythonParser;

/// A successfully parsed Python file with its syntax tree.
///
/// The source text is kept alongside the tree because tree-sitter nodes only carry byte
/// offsets; every name, docstring and literal is sliced out of `source`.
#[derive(Debug)]
pub struct ParsedFile {
    /// Path to the source file
    pub path: PathBuf,
    /// The raw source text
    pub source: String,
    /// The parsed syntax tree
    pub tree: Tree,
}

impl ParsedFile {
    /// Root `module` node of the tree
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source bytes the tree was parsed from
    pub fn bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }
}

/// Text covered by `node`, or an empty string if it is not valid UTF-8.
pub fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

impl PythonParser {
    /// Parses a single Python source file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (or is not UTF-8)
    /// - The file contains invalid Python syntax
    pub fn parse_file(path: &Path) -> Result<ParsedFile> {
        debug!("Parsing file: {}", path.display());

        let source = fs::read_to_string(path).map_err(|source| ScanError::Io {
            file: path.to_path_buf(),
            source,
        })?;

        let parsed = Self::parse_source(path, source)?;

        debug!("Successfully parsed file: {}", path.display());
        Ok(parsed)
    }

    /// Parses source text that has already been read, attributing errors to `path`.
    pub fn parse_source(path: impl Into<PathBuf>, source: String) -> Result<ParsedFile> {
        let path = path.into();

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| ScanError::Parse {
                file: path.clone(),
                line: 0,
                column: 0,
                message: format!("Failed to load Python grammar: {}", e),
            })?;

        let tree = parser.parse(&source, None).ok_or_else(|| ScanError::Parse {
            file: path.clone(),
            line: 0,
            column: 0,
            message: "Parser returned no syntax tree".to_string(),
        })?;

        let root = tree.root_node();
        if root.has_error() {
            let (line, column, message) = match first_error(root) {
                Some(node) => describe_error(node, source.as_bytes()),
                None => (1, 1, "invalid syntax".to_string()),
            };
            return Err(ScanError::Parse {
                file: path,
                line,
                column,
                message,
            });
        }

        Ok(ParsedFile { path, source, tree })
    }
}

/// Depth-first search for the first `ERROR` or missing node.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }

    None
}

fn describe_error(node: Node, source: &[u8]) -> (usize, usize, String) {
    let position = node.start_position();
    let message = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        let snippet: String = node_text(node, source)
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(40)
            .collect();
        format!("invalid syntax near `{}`", snippet.trim())
    };

    (position.row + 1, position.column + 1, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    /// Helper function to create a temporary file with content
    fn create_temp_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let file_path = dir.path().join(name);
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file_path
    }

    #[test]
    fn test_parse_valid_python_file() {
        let temp_dir = TempDir::new().unwrap();
        let valid_code = r#"
import os


class User:
    def __init__(self, name):
        self.name = name


def get_user(user_id):
    return None
"#;

        let file_path = create_temp_file(&temp_dir, "valid.py", valid_code);
        let parsed = PythonParser::parse_file(&file_path).unwrap();

        assert_eq!(parsed.path, file_path);
        assert_eq!(parsed.root().kind(), "module");
        assert_eq!(parsed.root().named_child_count(), 3);
    }

    #[test]
    fn test_parse_invalid_python_file() {
        let temp_dir = TempDir::new().unwrap();
        let invalid_code = "def broken(:\n    pass\n";

        let file_path = create_temp_file(&temp_dir, "invalid.py", invalid_code);
        let result = PythonParser::parse_file(&file_path);

        match result {
            Err(ScanError::Parse { file, line, .. }) => {
                assert_eq!(file, file_path);
                assert_eq!(line, 1);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_nonexistent_file() {
        let result = PythonParser::parse_file(Path::new("/nonexistent/file.py"));

        assert!(matches!(result, Err(ScanError::Io { .. })));
    }

    #[test]
    fn test_parse_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = create_temp_file(&temp_dir, "empty.py", "");

        let parsed = PythonParser::parse_file(&file_path).unwrap();
        assert_eq!(parsed.root().named_child_count(), 0);
    }

    #[test]
    fn test_parse_source_keeps_text() {
        let parsed = PythonParser::parse_source("inline.py", "x = 1\n".to_string()).unwrap();

        assert_eq!(parsed.source, "x = 1\n");
        let statement = parsed.root().named_child(0).unwrap();
        assert_eq!(node_text(statement, parsed.bytes()), "x = 1");
    }
}
