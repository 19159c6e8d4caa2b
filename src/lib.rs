//! README generator - Automatic project documentation from Python source code.
//!
//! This library statically analyzes a directory of Python files and renders what it finds
//! into a README document. The analysis is a best-effort heuristic over the top level of
//! each file: it records functions, classes with their methods, Flask route registrations
//! and the `run(...)` call that starts the server.
//!
//! # Architecture
//!
//! 1. [`scanner`] - Walks the project directory and renders the code-structure tree
//! 2. [`parser`] - Parses Python files into tree-sitter syntax trees
//! 3. [`detector`] - Detects Flask imports
//! 4. [`extractor`] - Classifies top-level declarations and routes
//! 5. [`project`] - Aggregates declarations across files with per-file error isolation
//! 6. [`entry`] - Locates the entry file and its port
//! 7. [`language`] - Maps file extensions to language labels
//! 8. [`renderer`] - Fills the Portuguese or English README template
//! 9. [`session`] - Prompts the operator for the free-text answers
//! 10. [`serializer`] - Dumps scan metadata and writes the output file
//!
//! # Example Usage
//!
//! ```no_run
//! use readme_from_source::{
//!     language::detect_languages,
//!     project::ProjectScanner,
//!     renderer::{locale::{Language, Status}, render, RenderInput},
//!     scanner::FileScanner,
//! };
//! use std::path::PathBuf;
//!
//! let scanner = FileScanner::new(PathBuf::from("./my-project"));
//! let scan = ProjectScanner::new(scanner.clone()).scan().unwrap();
//! let languages = detect_languages(&scanner).unwrap();
//! let code_structure = scanner.code_structure().unwrap();
//!
//! let document = render(&RenderInput {
//!     language: Language::English,
//!     status: Status::Development,
//!     objective: "track expenses",
//!     functionality: "show monthly charts",
//!     languages: &languages,
//!     code_structure: &code_structure,
//!     scan: &scan,
//! });
//! println!("{}", document);
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod scanner;
pub mod parser;
pub mod detector;
pub mod extractor;
pub mod project;
pub mod entry;
pub mod language;
pub mod renderer;
pub mod session;
pub mod serializer;
pub mod error;
