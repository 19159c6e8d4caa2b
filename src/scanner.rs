use anyhow::{bail, Result};
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extension of the source files that get analyzed
pub const SOURCE_EXTENSION: &str = "py";

/// Directories skipped in addition to hidden ones
pub const SKIPPED_DIRS: &[&str] = &["__pycache__", "venv", "node_modules"];

/// File scanner for traversing project directories.
///
/// The `FileScanner` walks a project directory and applies the eligibility policy shared
/// by every pass of the generator:
/// - hidden entries (starting with `.`) are skipped, directories included
/// - `__pycache__`, `venv` and `node_modules` directories are skipped
/// - files whose name is in the exclusion set are skipped
///
/// The walk is deterministic: inside each directory, files are visited before
/// subdirectories and both are sorted by name.
///
/// # Example
///
/// ```no_run
/// use readme_from_source::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(PathBuf::from("./my-project"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} Python files", result.files.len());
/// ```
#[derive(Debug, Clone)]
pub struct FileScanner {
    root_path: PathBuf,
    excludes: HashSet<String>,
}

/// Result of a directory walk.
///
/// Contains the discovered files and any warnings encountered during the walk.
#[derive(Debug, Default)]
pub struct WalkResult {
    /// Discovered files in walk order
    pub files: Vec<PathBuf>,
    /// Warning messages for any issues encountered (e.g., inaccessible directories)
    pub warnings: Vec<String>,
}

impl FileScanner {
    /// Creates a new `FileScanner` for the specified root directory.
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            excludes: HashSet::new(),
        }
    }

    /// Adds file names that are never scanned.
    pub fn with_excludes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(names.into_iter().map(Into::into));
        self
    }

    /// Root directory of the scan
    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Returns true if `name` is in the exclusion set.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excludes.contains(name)
    }

    /// Collects all eligible `.py` files.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory does not exist or is not a directory.
    pub fn scan(&self) -> Result<WalkResult> {
        let mut result = self.walk()?;
        result
            .files
            .retain(|path| path.extension().and_then(|s| s.to_str()) == Some(SOURCE_EXTENSION));

        debug!(
            "Found {} eligible source files under {}",
            result.files.len(),
            self.root_path.display()
        );
        Ok(result)
    }

    /// Collects every non-excluded file regardless of extension.
    pub fn scan_all(&self) -> Result<WalkResult> {
        self.walk()
    }

    /// Renders the Markdown tree of eligible source files.
    ///
    /// Returns an empty string when the project has no eligible files.
    pub fn code_structure(&self) -> Result<String> {
        let result = self.scan()?;
        let relative: Vec<PathBuf> = result
            .files
            .iter()
            .filter_map(|path| path.strip_prefix(&self.root_path).ok())
            .map(Path::to_path_buf)
            .collect();
        Ok(render_tree(&relative))
    }

    fn walk(&self) -> Result<WalkResult> {
        if !self.root_path.is_dir() {
            bail!(
                "Project path is not an accessible directory: {}",
                self.root_path.display()
            );
        }

        let mut result = WalkResult::default();

        for entry in WalkDir::new(&self.root_path)
            .sort_by(files_first)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !Self::is_skipped(e))
        {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let name = entry.file_name().to_string_lossy();
                    if self.is_excluded(&name) {
                        debug!("Excluding file: {}", entry.path().display());
                        continue;
                    }
                    result.files.push(entry.into_path());
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    result.warnings.push(warning);
                }
            }
        }

        Ok(result)
    }

    /// Skip hidden entries and well-known non-source directories
    fn is_skipped(entry: &DirEntry) -> bool {
        let file_name = entry.file_name().to_string_lossy();
        if file_name.starts_with('.') {
            return true;
        }
        entry.file_type().is_dir() && SKIPPED_DIRS.iter().any(|dir| file_name == *dir)
    }
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Renders relative file paths as a nested Markdown list.
///
/// Directories become `- **name/**` items, files become `` - `name` `` items one level
/// deeper than their directory, four spaces per level. The paths must be in walk order
/// (a directory's files before its subdirectories).
pub fn render_tree(files: &[PathBuf]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut open_dirs: Vec<String> = Vec::new();

    for path in files {
        let components: Vec<String> = path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let Some((name, dirs)) = components.split_last() else {
            continue;
        };

        let shared = open_dirs
            .iter()
            .zip(dirs)
            .take_while(|(open, dir)| open == dir)
            .count();
        open_dirs.truncate(shared);

        for (depth, dir) in dirs.iter().enumerate().skip(shared) {
            lines.push(format!("{}- **{}/**", "    ".repeat(depth), dir));
            open_dirs.push(dir.clone());
        }

        lines.push(format!("{}- `{}`", "    ".repeat(dirs.len()), name));
    }

    lines.join("\n")
}

/// `path` relative to `root`, with `/` separators.
pub fn relative_display(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(result: &WalkResult, root: &Path) -> Vec<String> {
        result
            .files
            .iter()
            .map(|p| relative_display(root, p))
            .collect()
    }

    #[test]
    fn test_scan_normal_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("main.py"), "print('hi')").unwrap();
        fs::write(root.join("models.py"), "class User: pass").unwrap();
        fs::write(root.join("readme.md"), "# README").unwrap();

        let scanner = FileScanner::new(root.to_path_buf());
        let result = scanner.scan().unwrap();

        assert_eq!(names(&result, root), vec!["main.py", "models.py"]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let scanner = FileScanner::new(temp_dir.path().to_path_buf());
        let result = scanner.scan().unwrap();

        assert!(result.files.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scan_missing_directory_is_an_error() {
        let scanner = FileScanner::new(PathBuf::from("/nonexistent/project"));

        assert!(scanner.scan().is_err());
    }

    #[test]
    fn test_scan_walk_order_files_before_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("app/models")).unwrap();
        fs::write(root.join("zeta.py"), "").unwrap();
        fs::write(root.join("app/views.py"), "").unwrap();
        fs::write(root.join("app/models/user.py"), "").unwrap();
        fs::write(root.join("app/__init__.py"), "").unwrap();

        let scanner = FileScanner::new(root.to_path_buf());
        let result = scanner.scan().unwrap();

        assert_eq!(
            names(&result, root),
            vec![
                "zeta.py",
                "app/__init__.py",
                "app/views.py",
                "app/models/user.py"
            ]
        );
    }

    #[test]
    fn test_scan_skips_hidden_and_tooling_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join(".git")).unwrap();
        fs::create_dir(root.join("__pycache__")).unwrap();
        fs::create_dir_all(root.join("venv/lib")).unwrap();
        fs::write(root.join(".git/hook.py"), "").unwrap();
        fs::write(root.join("__pycache__/cached.py"), "").unwrap();
        fs::write(root.join("venv/lib/site.py"), "").unwrap();
        fs::write(root.join(".hidden.py"), "").unwrap();
        fs::write(root.join("main.py"), "").unwrap();

        let scanner = FileScanner::new(root.to_path_buf());
        let result = scanner.scan().unwrap();

        assert_eq!(names(&result, root), vec!["main.py"]);
    }

    #[test]
    fn test_scan_honors_excludes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("generator.py"), "").unwrap();
        fs::write(root.join("app.py"), "").unwrap();

        let scanner = FileScanner::new(root.to_path_buf()).with_excludes(["generator.py"]);
        let result = scanner.scan().unwrap();

        assert_eq!(names(&result, root), vec!["app.py"]);
    }

    #[test]
    fn test_scan_all_keeps_other_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("app.py"), "").unwrap();
        fs::write(root.join("style.css"), "").unwrap();

        let scanner = FileScanner::new(root.to_path_buf());
        let result = scanner.scan_all().unwrap();

        assert_eq!(names(&result, root), vec!["app.py", "style.css"]);
    }

    #[test]
    fn test_code_structure() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("app/models")).unwrap();
        fs::create_dir(root.join("static")).unwrap();
        fs::write(root.join("run.py"), "").unwrap();
        fs::write(root.join("app/views.py"), "").unwrap();
        fs::write(root.join("app/models/user.py"), "").unwrap();
        fs::write(root.join("static/site.css"), "").unwrap();

        let scanner = FileScanner::new(root.to_path_buf());
        let tree = scanner.code_structure().unwrap();

        assert_eq!(
            tree,
            "- `run.py`\n\
             - **app/**\n    \
             - `views.py`\n    \
             - **models/**\n        \
             - `user.py`"
        );
    }

    #[test]
    fn test_code_structure_empty_project() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let scanner = FileScanner::new(temp_dir.path().to_path_buf());

        assert_eq!(scanner.code_structure().unwrap(), "");
    }

    #[test]
    fn test_render_tree_reopens_sibling_directories() {
        let files = vec![
            PathBuf::from("a/one.py"),
            PathBuf::from("a/b/two.py"),
            PathBuf::from("c/three.py"),
        ];

        assert_eq!(
            render_tree(&files),
            "- **a/**\n    - `one.py`\n    - **b/**\n        - `two.py`\n- **c/**\n    - `three.py`"
        );
    }
}
