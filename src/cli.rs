use crate::renderer::locale::{Language, Status};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Default name of the generated document
pub const DEFAULT_OUTPUT: &str = "README.md";

/// README generator - Document a Python project from its source code
#[derive(Parser, Debug)]
#[command(name = "readme-from-source")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the project directory
    #[arg(value_name = "PROJECT_PATH", default_value = ".")]
    pub project_path: PathBuf,

    /// Output file path (defaults to README.md inside the project directory)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Language of the generated document (asked interactively if omitted)
    #[arg(short = 'l', long = "language", value_enum)]
    pub language: Option<Language>,

    /// Project status shown in the badge (asked interactively if omitted)
    #[arg(short = 's', long = "status", value_enum)]
    pub status: Option<Status>,

    /// Project objective (asked interactively if omitted)
    #[arg(long = "objective", value_name = "TEXT")]
    pub objective: Option<String>,

    /// Short description of the functionality (asked interactively if omitted)
    #[arg(long = "functionality", value_name = "TEXT")]
    pub functionality: Option<String>,

    /// File name to leave out of the scan (repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Abort on the first file that cannot be parsed
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Also print the scan metadata to stdout in this format
    #[arg(short = 'm', long = "metadata", value_enum)]
    pub metadata: Option<MetadataFormat>,

    /// Never prompt; unanswered questions take their defaults
    #[arg(long = "no-prompt")]
    pub no_prompt: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Metadata dump format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MetadataFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

impl CliArgs {
    /// Where the document is written
    pub fn output_file(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| self.project_path.join(DEFAULT_OUTPUT))
    }

    /// Exclusion set: the user's names plus the running executable's own file name
    pub fn excludes(&self) -> Vec<String> {
        let mut excludes = self.exclude.clone();
        if let Some(own_name) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.file_name().map(|n| n.to_string_lossy().into_owned()))
        {
            excludes.push(own_name);
        }
        excludes
    }
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.project_path.exists() {
        anyhow::bail!(
            "Project path does not exist: {}",
            args.project_path.display()
        );
    }

    if !args.project_path.is_dir() {
        anyhow::bail!(
            "Project path is not a directory: {}",
            args.project_path.display()
        );
    }

    info!("Project path: {}", args.project_path.display());
    info!("Output file: {}", args.output_file().display());
    if !args.exclude.is_empty() {
        info!("Excluded files: {}", args.exclude.join(", "));
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::language::detect_languages;
    use crate::project::{ErrorPolicy, ProjectScanner};
    use crate::renderer::{render, RenderInput};
    use crate::scanner::FileScanner;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
    use crate::session::{
        answers_from_presets, run_session, should_be_interactive, unanswered, PresetAnswers,
    };

    // Step 1: Collect the operator answers
    let presets = PresetAnswers {
        language: args.language,
        status: args.status,
        objective: args.objective.clone(),
        functionality: args.functionality.clone(),
    };
    let answers = if args.no_prompt {
        debug!("Prompts disabled, using presets and defaults");
        answers_from_presets(presets)
    } else if !should_be_interactive() {
        let missing = unanswered(&presets);
        if !missing.is_empty() {
            warn!(
                "No terminal to prompt on, using defaults for: {} (pass them as flags or use --no-prompt)",
                missing.join(", ")
            );
        }
        answers_from_presets(presets)
    } else {
        run_session(presets)?
    };
    debug!("Answers: {:?}", answers);

    // Step 2: Scan the project
    let scanner = FileScanner::new(args.project_path.clone()).with_excludes(args.excludes());
    let policy = if args.fail_fast {
        ErrorPolicy::FailFast
    } else {
        ErrorPolicy::Continue
    };
    let scan = ProjectScanner::new(scanner.clone())
        .with_policy(policy)
        .scan()?;

    if !scan.failures.is_empty() {
        warn!(
            "{} file(s) could not be analyzed and were left out",
            scan.failures.len()
        );
    }

    // Step 3: Auxiliary artifacts
    let languages = detect_languages(&scanner)?;
    let code_structure = scanner.code_structure()?;

    // Step 4: Render and write
    let document = render(&RenderInput {
        language: answers.language,
        status: answers.status,
        objective: &answers.objective,
        functionality: &answers.functionality,
        languages: &languages,
        code_structure: &code_structure,
        scan: &scan,
    });

    let output = args.output_file();
    info!("Writing document to: {}", output.display());
    write_to_file(&document, &output)?;

    // Step 5: Optional metadata dump
    if let Some(format) = args.metadata {
        let content = match format {
            MetadataFormat::Yaml => serialize_yaml(&scan)?,
            MetadataFormat::Json => serialize_json(&scan)?,
        };
        println!("{}", content);
    }

    let file_name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    eprintln!("{} {}", file_name, answers.language.locale().generated);

    info!("Summary:");
    info!("  - Files scanned: {}", scan.files_scanned);
    info!("  - Files skipped: {}", scan.failures.len());
    info!("  - Functions: {}", scan.functions.len());
    info!("  - Classes: {}", scan.classes.len());
    info!("  - Routes: {}", scan.routes.len());
    info!("  - Entry file: {}", scan.entry_file.as_deref().unwrap_or("-"));

    Ok(())
}
