use crate::entry::EntryPointLocator;
use crate::error::ScanError;
use crate::extractor::python::PythonExtractor;
use crate::extractor::{
    ClassRecord, DeclarationExtractor, FileDeclarations, FunctionRecord, RouteRecord,
};
use crate::parser::PythonParser;
use crate::scanner::{relative_display, FileScanner};
use anyhow::Result;
use log::{debug, info, warn};
use serde::Serialize;
use std::path::Path;

/// What to do when a single file cannot be read, parsed or extracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log a warning, record the failure and keep scanning
    #[default]
    Continue,
    /// Abort the whole scan on the first failure
    FailFast,
}

/// One successfully extracted source file.
#[derive(Debug, Clone)]
pub struct FileScan {
    /// Path relative to the project root, `/`-separated
    pub relative_path: String,
    /// Raw source text, kept for the port lookup
    pub source: String,
    pub declarations: FileDeclarations,
}

/// Aggregated metadata of a whole project.
///
/// Records are kept in walk-then-declaration order without deduplication: two files
/// defining `main` yield two function records.
#[derive(Debug, Default, Serialize)]
pub struct ScanResult {
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
    pub routes: Vec<RouteRecord>,
    pub uses_framework: bool,
    pub has_serve_call: bool,
    pub entry_file: Option<String>,
    pub port: Option<String>,
    pub files_scanned: usize,
    pub failures: Vec<ScanError>,
}

impl ScanResult {
    /// Folds one file's declarations into the aggregate
    fn absorb(mut self, declarations: FileDeclarations) -> Self {
        self.functions.extend(declarations.functions);
        self.classes.extend(declarations.classes);
        self.routes.extend(declarations.routes);
        self.uses_framework |= declarations.uses_framework;
        self.has_serve_call |= declarations.has_serve_call;
        self.files_scanned += 1;
        self
    }

    /// True when the routes section and the framework run instructions apply
    pub fn is_web_app(&self) -> bool {
        self.uses_framework && !self.routes.is_empty()
    }
}

/// Project scanner aggregating declarations across every eligible file.
///
/// # Example
///
/// ```no_run
/// use readme_from_source::project::{ErrorPolicy, ProjectScanner};
/// use readme_from_source::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(PathBuf::from("./my-project"));
/// let result = ProjectScanner::new(scanner)
///     .with_policy(ErrorPolicy::FailFast)
///     .scan()
///     .unwrap();
/// println!("{} functions, {} routes", result.functions.len(), result.routes.len());
/// ```
pub struct ProjectScanner {
    scanner: FileScanner,
    extractor: Box<dyn DeclarationExtractor>,
    policy: ErrorPolicy,
}

impl ProjectScanner {
    /// Creates a project scanner using the Python extractor and the `Continue` policy.
    pub fn new(scanner: FileScanner) -> Self {
        Self {
            scanner,
            extractor: Box::new(PythonExtractor),
            policy: ErrorPolicy::default(),
        }
    }

    /// Sets the per-file error policy.
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the declaration extractor.
    pub fn with_extractor(mut self, extractor: Box<dyn DeclarationExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Parses and extracts every eligible file in walk order.
    ///
    /// Returns the successful extractions together with the per-file failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be walked, or on the first per-file failure
    /// under [`ErrorPolicy::FailFast`].
    pub fn scan_files(&self) -> Result<(Vec<FileScan>, Vec<ScanError>)> {
        let walk = self.scanner.scan()?;

        let mut files = Vec::new();
        let mut failures = Vec::new();

        for path in walk.files {
            match self.scan_file(&path) {
                Ok(file) => files.push(file),
                Err(e) => match self.policy {
                    ErrorPolicy::FailFast => return Err(e.into()),
                    ErrorPolicy::Continue => {
                        warn!("Skipping {}: {}", path.display(), e);
                        failures.push(e);
                    }
                },
            }
        }

        debug!(
            "Scanned {} files, {} skipped",
            files.len(),
            failures.len()
        );
        Ok((files, failures))
    }

    /// Builds the aggregated [`ScanResult`], including the entry point.
    pub fn scan(&self) -> Result<ScanResult> {
        info!("Scanning {}", self.scanner.root().display());

        let (files, failures) = self.scan_files()?;
        let entry = EntryPointLocator::locate_in(&files);

        let mut result = files
            .into_iter()
            .fold(ScanResult::default(), |acc, file| acc.absorb(file.declarations));
        result.entry_file = entry.file;
        result.port = entry.port;
        result.failures = failures;

        info!(
            "Found {} functions, {} classes and {} routes in {} files",
            result.functions.len(),
            result.classes.len(),
            result.routes.len(),
            result.files_scanned
        );
        Ok(result)
    }

    fn scan_file(&self, path: &Path) -> std::result::Result<FileScan, ScanError> {
        let parsed = PythonParser::parse_file(path)?;
        let declarations = self.extractor.extract(&parsed)?;

        Ok(FileScan {
            relative_path: relative_display(self.scanner.root(), path),
            source: parsed.source,
            declarations,
        })
    }
}
