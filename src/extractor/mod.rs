//! Declaration extraction module for classifying top-level source declarations.
//!
//! This module defines the records produced by a scan (functions, classes with methods,
//! route registrations) and the [`DeclarationExtractor`] seam that turns one parsed file
//! into a [`FileDeclarations`] value. Extraction is driven by a small syntax-node
//! classification, [`NodeKind`], so the walk itself does not depend on grammar-specific
//! node names.
//!
//! # Supported Languages
//!
//! - **Python** (with Flask route detection): See [`python::PythonExtractor`]
//!
//! # Example
//!
//! ```no_run
//! use readme_from_source::extractor::{DeclarationExtractor, python::PythonExtractor};
//! use readme_from_source::parser::PythonParser;
//! use std::path::Path;
//!
//! let parsed = PythonParser::parse_file(Path::new("app.py")).unwrap();
//! let declarations = PythonExtractor.extract(&parsed).unwrap();
//! println!("Found {} routes", declarations.routes.len());
//! ```

pub mod python;

use crate::error::Result;
use crate::parser::ParsedFile;
use serde::Serialize;
use tree_sitter::Node;

/// Trait for extracting top-level declarations from a parsed file.
pub trait DeclarationExtractor {
    /// Classifies the top-level statements of `parsed`.
    ///
    /// # Errors
    ///
    /// Returns an error when a route registration cannot be read literally (for example
    /// a computed path). Callers decide whether that aborts the scan.
    fn extract(&self, parsed: &ParsedFile) -> Result<FileDeclarations>;
}

/// Shape of a top-level statement, as far as extraction is concerned.
#[derive(Debug)]
pub enum NodeKind<'tree> {
    /// A function definition; `decorators` holds the decorator expressions in order
    FunctionDecl {
        node: Node<'tree>,
        decorators: Vec<Node<'tree>>,
    },
    /// A class definition; `decorators` holds the decorator expressions in order
    ClassDecl {
        node: Node<'tree>,
        decorators: Vec<Node<'tree>>,
    },
    /// An expression statement consisting of a single call; holds the call node
    ExpressionCallStatement(Node<'tree>),
    /// An import statement
    ImportDecl(Node<'tree>),
    /// The body block of an `if __name__ == "__main__":` guard
    MainGuard(Node<'tree>),
    /// Anything else
    Other,
}

/// A top-level function and its docstring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord {
    pub name: String,
    pub description: Option<String>,
}

/// A method declared directly inside a class body.
pub type MethodRecord = FunctionRecord;

/// A top-level class with its methods in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRecord {
    pub name: String,
    pub description: Option<String>,
    pub methods: Vec<MethodRecord>,
}

/// A detected route registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRecord {
    /// The URL path exactly as written in the literal
    pub path: String,
    /// The `methods=` literals joined with `", "`; empty when unspecified
    pub http_methods: String,
}

impl RouteRecord {
    /// Create a new RouteRecord
    pub fn new(path: impl Into<String>, http_methods: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            http_methods: http_methods.into(),
        }
    }
}

impl FunctionRecord {
    /// Create a new FunctionRecord
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }
}

/// Everything extracted from a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileDeclarations {
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
    pub routes: Vec<RouteRecord>,
    /// The file calls `<receiver>.run(...)` at top level
    pub has_serve_call: bool,
    /// The file imports the web framework or registers a route
    pub uses_framework: bool,
}
