use crate::parser::node_text;
use tree_sitter::Node;

/// Top-level module name of the web framework the scanner recognizes
pub const FRAMEWORK_MODULE: &str = "flask";

/// Framework detector for identifying Flask applications.
///
/// The `FrameworkDetector` examines one import statement at a time; the extractor feeds it
/// the top-level statements of each file. An import counts when the first segment of its dotted module path is exactly
/// `flask` (case-sensitive), so `import flask`, `import flask.json as fj` and
/// `from flask import Flask` all match while `import flask_cors` and relative imports
/// do not.
pub struct FrameworkDetector;

impl FrameworkDetector {
    /// Checks a single `import` / `from ... import` statement node.
    ///
    /// Any other node kind yields `false`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use readme_from_source::detector::FrameworkDetector;
    /// use readme_from_source::parser::PythonParser;
    ///
    /// let parsed = PythonParser::parse_source("app.py", "import flask\n".to_string()).unwrap();
    /// let import = parsed.root().named_child(0).unwrap();
    /// assert!(FrameworkDetector::is_framework_import(import, parsed.bytes()));
    /// ```
    pub fn is_framework_import(node: Node, source: &[u8]) -> bool {
        Self::imported_modules(node, source)
            .iter()
            .any(|module| Self::matches_framework(module))
    }

    /// Returns true if the dotted module path belongs to the framework package.
    pub fn matches_framework(module: &str) -> bool {
        module.split('.').next() == Some(FRAMEWORK_MODULE)
    }

    /// Collects the module paths referenced by an import statement
    fn imported_modules<'a>(node: Node, source: &'a [u8]) -> Vec<&'a str> {
        match node.kind() {
            "import_statement" => {
                let mut cursor = node.walk();
                let modules = node
                    .children_by_field_name("name", &mut cursor)
                    .filter_map(|name| match name.kind() {
                        "dotted_name" => Some(node_text(name, source)),
                        // `import x as y`: the module is the aliased name
                        "aliased_import" => name
                            .child_by_field_name("name")
                            .map(|inner| node_text(inner, source)),
                        _ => None,
                    })
                    .collect();
                modules
            }
            "import_from_statement" => node
                .child_by_field_name("module_name")
                .filter(|module| module.kind() == "dotted_name")
                .map(|module| vec![node_text(module, source)])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}
