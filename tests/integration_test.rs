use pretty_assertions::assert_eq;
use readme_from_source::{
    error::ScanError,
    extractor::{FunctionRecord, RouteRecord},
    language::detect_languages,
    project::{ErrorPolicy, ProjectScanner, ScanResult},
    renderer::{
        locale::{Language, Status},
        render, RenderInput,
    },
    scanner::FileScanner,
    serializer::{serialize_json, write_to_file},
};
use tempfile::TempDir;

/// Helper function to create a temporary test project
fn create_test_project(files: Vec<(&str, &str)>) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    for (path, content) in files {
        let file_path = temp_dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&file_path, content).expect("Failed to write test file");
    }

    temp_dir
}

fn flask_project() -> TempDir {
    create_test_project(vec![
        ("flask_app.py", include_str!("fixtures/flask_app.py")),
        ("models.py", include_str!("fixtures/models.py")),
        ("requirements.txt", "flask\n"),
        ("static/style.css", "body { margin: 0; }\n"),
        (".venv/lib/site.py", "def vendored():\n    pass\n"),
    ])
}

/// Runs the whole pipeline the way the CLI does, without prompts
fn generate(scanner: &FileScanner, language: Language) -> (ScanResult, String) {
    let scan = ProjectScanner::new(scanner.clone())
        .scan()
        .expect("Failed to scan project");
    let languages = detect_languages(scanner).expect("Failed to detect languages");
    let code_structure = scanner
        .code_structure()
        .expect("Failed to render code structure");

    let document = render(&RenderInput {
        language,
        status: Status::Development,
        objective: "manage an inventory",
        functionality: "expose it over HTTP",
        languages: &languages,
        code_structure: &code_structure,
        scan: &scan,
    });
    (scan, document)
}

#[test]
fn test_flask_end_to_end_generation() {
    let temp_dir = flask_project();
    let scanner = FileScanner::new(temp_dir.path().to_path_buf());

    let (scan, document) = generate(&scanner, Language::English);

    // Step 1: Declarations
    let function_names: Vec<&str> = scan.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(function_names, vec!["index", "items", "health", "_helper"]);
    assert_eq!(
        scan.functions[1].description.as_deref(),
        Some("List the stored items.\n\nAccepts a JSON body on POST.")
    );
    assert_eq!(scan.classes.len(), 1);
    let method_names: Vec<&str> = scan.classes[0]
        .methods
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(method_names, vec!["__init__", "add", "all"]);

    // Step 2: Routes and entry point
    assert_eq!(
        scan.routes,
        vec![
            RouteRecord::new("/", ""),
            RouteRecord::new("/items", "GET, POST")
        ]
    );
    assert!(scan.uses_framework);
    assert_eq!(scan.entry_file.as_deref(), Some("flask_app.py"));
    assert_eq!(scan.port.as_deref(), Some("8080"));

    // Step 3: Document
    assert!(document.starts_with(
        "![Status](https://img.shields.io/badge/STATUS-IN%20DEVELOPMENT-yellow?style=for-the-badge)\n\
         ![Python](https://img.shields.io/badge/Code-Python-blue.svg) \
         ![CSS](https://img.shields.io/badge/Code-CSS-blue.svg)\n"
    ));
    assert!(document.contains("The code is organized as follows:\n\n- `flask_app.py`\n- `models.py`\n"));
    assert!(document.contains("### Class `Inventory`\n\nIn-memory item store."));
    assert!(document.contains("- `/`\n- `/items` (GET, POST)"));
    assert!(document.contains("```bash\npython flask_app.py\n```"));
    assert!(document.ends_with("The application will run by default at `http://0.0.0.0:8080`.\n"));
    assert!(!document.contains("vendored"));
    assert!(!document.contains("`inner`"));
}

#[test]
fn test_generation_is_idempotent() {
    let temp_dir = flask_project();
    let scanner = FileScanner::new(temp_dir.path().to_path_buf());
    let output = temp_dir.path().join("README.md");

    let (_, first) = generate(&scanner, Language::Portuguese);
    write_to_file(&first, &output).expect("Failed to write README");
    let first_bytes = std::fs::read(&output).unwrap();

    let (_, second) = generate(&scanner, Language::Portuguese);
    write_to_file(&second, &output).expect("Failed to write README");
    let second_bytes = std::fs::read(&output).unwrap();

    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn test_language_switch_changes_only_boilerplate() {
    let temp_dir = flask_project();
    let scanner = FileScanner::new(temp_dir.path().to_path_buf());

    let (_, portuguese) = generate(&scanner, Language::Portuguese);
    let (_, english) = generate(&scanner, Language::English);

    assert!(portuguese.contains("# Índice"));
    assert!(english.contains("# Table of Contents"));
    for fact in [
        "`index`",
        "`Inventory`",
        "In-memory item store.",
        "- `/items` (GET, POST)",
        "python flask_app.py",
    ] {
        assert!(portuguese.contains(fact), "portuguese is missing {}", fact);
        assert!(english.contains(fact), "english is missing {}", fact);
    }
}

#[test]
fn test_plain_script_project() {
    let temp_dir = create_test_project(vec![
        ("tool.py", "def main():\n    \"\"\"Entry.\"\"\"\n\nclass Runner:\n    def run(self):\n        pass\n\nRunner().run()\n"),
    ]);
    let scanner = FileScanner::new(temp_dir.path().to_path_buf());

    let (scan, document) = generate(&scanner, Language::English);

    assert!(!scan.uses_framework);
    assert!(scan.has_serve_call);
    assert_eq!(scan.entry_file.as_deref(), Some("tool.py"));
    assert!(!document.contains("Application Routes"));
    assert!(document.ends_with(
        "To run the application, use the following command:\n\n```bash\npython tool.py\n```\n"
    ));
}

#[test]
fn test_empty_project_renders_complete_document() {
    let temp_dir = create_test_project(vec![("notes.txt", "nothing here")]);
    let scanner = FileScanner::new(temp_dir.path().to_path_buf());

    let (scan, document) = generate(&scanner, Language::Portuguese);

    assert_eq!(scan.files_scanned, 0);
    assert!(document.contains("# Funções e Classes"));
    assert!(!document.contains("# Rotas da Aplicação"));
    assert!(document.ends_with(
        "Para executar a aplicação, utilize o comando apropriado, especificando o arquivo principal.\n"
    ));
}

#[test]
fn test_broken_file_is_isolated() {
    let temp_dir = create_test_project(vec![
        ("a_broken.py", "def broken(:\n    pass\n"),
        ("b_good.py", "def fine():\n    pass\n"),
    ]);
    let scanner = FileScanner::new(temp_dir.path().to_path_buf());

    let (scan, document) = generate(&scanner, Language::English);

    assert_eq!(scan.functions, vec![FunctionRecord::new("fine", None)]);
    assert_eq!(scan.failures.len(), 1);
    assert!(matches!(scan.failures[0], ScanError::Parse { .. }));
    assert!(document.contains("### `fine`"));

    let json = serialize_json(&scan).expect("Failed to serialize metadata");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["failures"][0]
        .as_str()
        .unwrap()
        .contains("a_broken.py"));
}

#[test]
fn test_fail_fast_aborts_generation() {
    let temp_dir = create_test_project(vec![
        ("a_broken.py", "class Broken(\n"),
        ("b_good.py", "def fine():\n    pass\n"),
    ]);
    let scanner = FileScanner::new(temp_dir.path().to_path_buf());

    let result = ProjectScanner::new(scanner)
        .with_policy(ErrorPolicy::FailFast)
        .scan();

    assert!(result.is_err());
}

#[test]
fn test_excluded_file_is_left_out() {
    let temp_dir = flask_project();
    let scanner =
        FileScanner::new(temp_dir.path().to_path_buf()).with_excludes(["models.py"]);

    let (scan, document) = generate(&scanner, Language::English);

    assert!(scan.classes.is_empty());
    assert!(!document.contains("models.py"));
    assert!(!document.contains("Inventory"));
}
