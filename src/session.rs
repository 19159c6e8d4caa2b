//! Interactive session: asks the operator for the answers the template needs.

use crate::renderer::locale::{Language, Status};
use anyhow::{Context, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::io::IsTerminal;

/// Operator answers used by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub language: Language,
    pub status: Status,
    pub objective: String,
    pub functionality: String,
}

/// Answers already supplied on the command line; `None` means "ask".
#[derive(Debug, Clone, Default)]
pub struct PresetAnswers {
    pub language: Option<Language>,
    pub status: Option<Status>,
    pub objective: Option<String>,
    pub functionality: Option<String>,
}

/// Maps a menu choice ("1", "2") to a language, defaulting to Portuguese.
pub fn language_from_choice(choice: &str) -> Language {
    match choice.trim() {
        "2" => Language::English,
        _ => Language::Portuguese,
    }
}

/// Maps a menu choice ("1".."3") to a status, defaulting to in-development.
pub fn status_from_choice(choice: &str) -> Status {
    match choice.trim() {
        "2" => Status::Completed,
        "3" => Status::Discontinued,
        _ => Status::Development,
    }
}

/// Fills unanswered presets with defaults without touching the terminal.
pub fn answers_from_presets(presets: PresetAnswers) -> Answers {
    Answers {
        language: presets.language.unwrap_or_default(),
        status: presets.status.unwrap_or_default(),
        objective: presets.objective.unwrap_or_default().trim().to_string(),
        functionality: presets.functionality.unwrap_or_default().trim().to_string(),
    }
}

/// Names of the questions `presets` leaves unanswered, in prompt order.
pub fn unanswered(presets: &PresetAnswers) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if presets.language.is_none() {
        missing.push("language");
    }
    if presets.status.is_none() {
        missing.push("status");
    }
    if presets.objective.is_none() {
        missing.push("objective");
    }
    if presets.functionality.is_none() {
        missing.push("functionality");
    }
    missing
}

/// True when both stdin and stdout are terminals.
pub fn should_be_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Runs the prompts for every answer not already present in `presets`.
pub fn run_session(presets: PresetAnswers) -> Result<Answers> {
    let theme = ColorfulTheme::default();

    eprintln!();
    eprintln!("{}", style("Bem-vindo ao Gerador de README.md!").bold().cyan());
    eprintln!();

    let language = match presets.language {
        Some(language) => language,
        None => {
            let index = Select::with_theme(&theme)
                .with_prompt("Selecione o idioma do README")
                .items(&["1 - Português", "2 - English"])
                .default(0)
                .interact()
                .context("Failed to get language selection")?;
            language_from_choice(&(index + 1).to_string())
        }
    };
    let locale = language.locale();

    let status = match presets.status {
        Some(status) => status,
        None => {
            let items = [
                format!("1 - {}", Status::Development.label(language)),
                format!("2 - {}", Status::Completed.label(language)),
                format!("3 - {}", Status::Discontinued.label(language)),
            ];
            let index = Select::with_theme(&theme)
                .with_prompt(locale.status_prompt)
                .items(&items)
                .default(0)
                .interact()
                .context("Failed to get status selection")?;
            status_from_choice(&(index + 1).to_string())
        }
    };

    let objective = match presets.objective {
        Some(objective) => objective,
        None => prompt_text(&theme, locale.objective_prompt)?,
    };

    let functionality = match presets.functionality {
        Some(functionality) => functionality,
        None => prompt_text(&theme, locale.functionality_prompt)?,
    };

    Ok(answers_from_presets(PresetAnswers {
        language: Some(language),
        status: Some(status),
        objective: Some(objective),
        functionality: Some(functionality),
    }))
}

fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> Result<String> {
    let text: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .with_context(|| format!("Failed to read answer for: {}", prompt))?;
    Ok(text)
}
