//! Document rendering: fills the README template from scan metadata and operator answers.
//!
//! Rendering is a pure function of [`RenderInput`]: the same input always yields the
//! same bytes. Language only selects the [`locale::Locale`] table, so switching it
//! changes headings and boilerplate but never the extracted facts.

pub mod badge;
pub mod locale;

use crate::extractor::{ClassRecord, FunctionRecord, RouteRecord};
use crate::project::ScanResult;
use locale::{anchor, Language, Locale, Status, DEFAULT_PORT};

/// Everything the template needs.
#[derive(Debug)]
pub struct RenderInput<'a> {
    pub language: Language,
    pub status: Status,
    pub objective: &'a str,
    pub functionality: &'a str,
    /// Detected language labels, rendered as badges
    pub languages: &'a [&'a str],
    /// Markdown tree from [`crate::scanner::FileScanner::code_structure`]
    pub code_structure: &'a str,
    pub scan: &'a ScanResult,
}

/// Renders the complete README document.
pub fn render(input: &RenderInput) -> String {
    let locale = input.language.locale();
    let scan = input.scan;
    let with_routes = scan.is_web_app();

    let mut blocks: Vec<String> = vec![
        format!(
            "{}\n{}",
            badge::status_badge(input.status.label(input.language), input.status.color()),
            badge::language_badges(input.languages)
        ),
        heading(locale.toc),
        table_of_contents(locale, with_routes),
        heading(locale.introduction),
        format!(
            "{} **{}**.\n{} **{}**.",
            locale.intro_objective,
            input.objective,
            locale.intro_functionality,
            input.functionality
        ),
        heading(locale.dependencies),
        locale.install_intro.to_string(),
        "```bash\npip install -r requirements.txt\n```".to_string(),
        heading(locale.code_structure),
        locale.structure_intro.to_string(),
    ];

    if !input.code_structure.is_empty() {
        blocks.push(input.code_structure.to_string());
    }

    blocks.push(heading(locale.functions_and_classes));
    blocks.extend(
        scan.functions
            .iter()
            .map(|function| function_doc(locale, function)),
    );
    blocks.extend(scan.classes.iter().map(|class| class_doc(locale, class)));

    if with_routes {
        blocks.push(heading(locale.routes));
        blocks.push(locale.routes_intro.to_string());
        blocks.push(routes_doc(&scan.routes));
    }

    blocks.push(heading(locale.execution));
    blocks.push(execution_section(locale, scan));

    let mut document = blocks.join("\n\n");
    document.push('\n');
    document
}

fn heading(title: &str) -> String {
    format!("# {}", title)
}

fn toc_entry(title: &str) -> String {
    format!("* [{}](#{})", title, anchor(title))
}

fn table_of_contents(locale: &Locale, with_routes: bool) -> String {
    let mut entries = vec![
        toc_entry(locale.introduction),
        toc_entry(locale.dependencies),
        toc_entry(locale.code_structure),
        toc_entry(locale.functions_and_classes),
    ];
    if with_routes {
        entries.push(toc_entry(locale.routes));
    }
    entries.push(toc_entry(locale.execution));
    entries.join("\n")
}

fn description<'a>(locale: &'a Locale, text: &'a Option<String>) -> &'a str {
    text.as_deref().unwrap_or(locale.no_description)
}

fn function_doc(locale: &Locale, function: &FunctionRecord) -> String {
    format!(
        "### `{}`\n\n{}",
        function.name,
        description(locale, &function.description)
    )
}

fn class_doc(locale: &Locale, class: &ClassRecord) -> String {
    let mut doc = format!(
        "### {} `{}`\n\n{}",
        locale.class_label,
        class.name,
        description(locale, &class.description)
    );

    if !class.methods.is_empty() {
        let methods: Vec<String> = class
            .methods
            .iter()
            .map(|method| {
                format!(
                    "- **`{}()`**\n{}",
                    method.name,
                    indent(description(locale, &method.description), "  ")
                )
            })
            .collect();
        doc.push_str(&format!(
            "\n\n#### {}\n\n{}",
            locale.methods_heading,
            methods.join("\n\n")
        ));
    }

    doc
}

fn routes_doc(routes: &[RouteRecord]) -> String {
    routes
        .iter()
        .map(|route| {
            if route.http_methods.is_empty() {
                format!("- `{}`", route.path)
            } else {
                format!("- `{}` ({})", route.path, route.http_methods)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn execution_section(locale: &Locale, scan: &ScanResult) -> String {
    match (scan.is_web_app(), scan.entry_file.as_deref()) {
        (true, Some(file)) => format!(
            "{}\n\n{}\n\n{} `http://0.0.0.0:{}`.",
            locale.run_framework_command,
            run_block(file),
            locale.runs_at,
            scan.port.as_deref().unwrap_or(DEFAULT_PORT)
        ),
        (true, None) => locale.run_framework_generic.to_string(),
        (false, Some(file)) => format!("{}\n\n{}", locale.run_command, run_block(file)),
        (false, None) => locale.run_generic.to_string(),
    }
}

fn run_block(file: &str) -> String {
    format!("```bash\npython {}\n```", file)
}

/// Indents every line so multi-line descriptions stay inside their list item
fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
