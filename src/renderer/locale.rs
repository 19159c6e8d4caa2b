//! Fixed headings and boilerplate sentences, one table per output language.

use clap::ValueEnum;
use serde::Serialize;

/// Port the framework binds when the serve-call does not name one
pub const DEFAULT_PORT: &str = "5000";

/// Output language of the generated document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
pub enum Language {
    /// Português
    #[default]
    #[value(name = "pt")]
    Portuguese,
    /// English
    #[value(name = "en")]
    English,
}

/// Project status shown in the status badge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
pub enum Status {
    #[default]
    Development,
    Completed,
    Discontinued,
}

impl Language {
    /// Boilerplate table for this language
    pub fn locale(self) -> &'static Locale {
        match self {
            Language::Portuguese => &PORTUGUESE,
            Language::English => &ENGLISH,
        }
    }
}

impl Status {
    /// Localized label, e.g. "Em Desenvolvimento"
    pub fn label(self, language: Language) -> &'static str {
        let locale = language.locale();
        match self {
            Status::Development => locale.status_development,
            Status::Completed => locale.status_completed,
            Status::Discontinued => locale.status_discontinued,
        }
    }

    /// shields.io color of the status badge
    pub fn color(self) -> &'static str {
        match self {
            Status::Development => "yellow",
            Status::Completed => "brightgreen",
            Status::Discontinued => "red",
        }
    }
}

#[derive(Debug)]
pub struct Locale {
    pub toc: &'static str,
    pub introduction: &'static str,
    pub dependencies: &'static str,
    pub code_structure: &'static str,
    pub functions_and_classes: &'static str,
    pub routes: &'static str,
    pub execution: &'static str,

    pub intro_objective: &'static str,
    pub intro_functionality: &'static str,
    pub install_intro: &'static str,
    pub structure_intro: &'static str,
    pub no_description: &'static str,
    pub class_label: &'static str,
    pub methods_heading: &'static str,
    pub routes_intro: &'static str,

    pub run_framework_command: &'static str,
    pub run_framework_generic: &'static str,
    pub runs_at: &'static str,
    pub run_command: &'static str,
    pub run_generic: &'static str,

    pub status_development: &'static str,
    pub status_completed: &'static str,
    pub status_discontinued: &'static str,

    pub status_prompt: &'static str,
    pub objective_prompt: &'static str,
    pub functionality_prompt: &'static str,
    pub generated: &'static str,
}

pub static PORTUGUESE: Locale = Locale {
    toc: "Índice",
    introduction: "Introdução",
    dependencies: "Instalação de Dependências",
    code_structure: "Estrutura do Código",
    functions_and_classes: "Funções e Classes",
    routes: "Rotas da Aplicação",
    execution: "Execução da Aplicação",

    intro_objective: "Este projeto tem como objetivo",
    intro_functionality: "Ele foi desenvolvido para",
    install_intro: "Para instalar as dependências, utilize o seguinte comando:",
    structure_intro: "O código está organizado da seguinte forma:",
    no_description: "Sem descrição disponível.",
    class_label: "Classe",
    methods_heading: "Métodos:",
    routes_intro: "As rotas da aplicação Flask são definidas para interagir com as diversas funcionalidades do projeto.",

    run_framework_command: "Para executar a aplicação Flask, utilize o seguinte comando:",
    run_framework_generic: "Para executar a aplicação Flask, utilize o comando apropriado, especificando o arquivo principal.",
    runs_at: "A aplicação será executada por padrão em",
    run_command: "Para executar a aplicação, utilize o seguinte comando:",
    run_generic: "Para executar a aplicação, utilize o comando apropriado, especificando o arquivo principal.",

    status_development: "Em Desenvolvimento",
    status_completed: "Concluído",
    status_discontinued: "Descontinuado",

    status_prompt: "Selecione o status do projeto",
    objective_prompt: "Insira o objetivo do projeto",
    functionality_prompt: "Insira uma descrição breve da funcionalidade",
    generated: "gerado com sucesso!",
};

pub static ENGLISH: Locale = Locale {
    toc: "Table of Contents",
    introduction: "Introduction",
    dependencies: "Installing Dependencies",
    code_structure: "Code Structure",
    functions_and_classes: "Functions and Classes",
    routes: "Application Routes",
    execution: "Running the Application",

    intro_objective: "This project aims to",
    intro_functionality: "It was developed to",
    install_intro: "To install the dependencies, use the following command:",
    structure_intro: "The code is organized as follows:",
    no_description: "No description available.",
    class_label: "Class",
    methods_heading: "Methods:",
    routes_intro: "The Flask application routes are defined to interact with the various functionalities of the project.",

    run_framework_command: "To run the Flask application, use the following command:",
    run_framework_generic: "To run the Flask application, use the appropriate command, specifying the main file.",
    runs_at: "The application will run by default at",
    run_command: "To run the application, use the following command:",
    run_generic: "To run the application, use the appropriate command, specifying the main file.",

    status_development: "In Development",
    status_completed: "Completed",
    status_discontinued: "Discontinued",

    status_prompt: "Select the project status",
    objective_prompt: "Enter the project objective",
    functionality_prompt: "Enter a short description of the functionality",
    generated: "generated successfully!",
};

/// GitHub-style heading anchor: lowercase, spaces to hyphens, punctuation dropped.
pub fn anchor(heading: &str) -> String {
    heading
        .chars()
        .filter_map(|c| {
            if c == ' ' {
                Some('-')
            } else if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_keeps_accents() {
        assert_eq!(anchor("Instalação de Dependências"), "instalação-de-dependências");
        assert_eq!(anchor("Application Routes"), "application-routes");
        assert_eq!(anchor("Q&A: Notes"), "qa-notes");
    }

    #[test]
    fn test_status_labels_and_colors() {
        assert_eq!(Status::Completed.label(Language::Portuguese), "Concluído");
        assert_eq!(Status::Completed.label(Language::English), "Completed");
        assert_eq!(Status::Discontinued.color(), "red");
        assert_eq!(Status::default().color(), "yellow");
    }
}
