//! shields.io badge helpers.

/// Build the status badge, e.g. `STATUS-EM%20DESENVOLVIMENTO-yellow`.
pub fn status_badge(label: &str, color: &str) -> String {
    format!(
        "![Status](https://img.shields.io/badge/STATUS-{}-{}?style=for-the-badge)",
        encode(label).to_uppercase(),
        color
    )
}

/// Build one `Code-<language>` badge per language, space separated.
pub fn language_badges(languages: &[&str]) -> String {
    languages
        .iter()
        .map(|language| {
            format!(
                "![{}](https://img.shields.io/badge/Code-{}-blue.svg)",
                language,
                encode(language)
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn encode(text: &str) -> String {
    text.replace(' ', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_badge_uppercases_and_encodes() {
        assert_eq!(
            status_badge("Em Desenvolvimento", "yellow"),
            "![Status](https://img.shields.io/badge/STATUS-EM%20DESENVOLVIMENTO-yellow?style=for-the-badge)"
        );
        assert_eq!(
            status_badge("Concluído", "brightgreen"),
            "![Status](https://img.shields.io/badge/STATUS-CONCLUÍDO-brightgreen?style=for-the-badge)"
        );
    }

    #[test]
    fn language_badges_are_space_joined() {
        assert_eq!(
            language_badges(&["Python", "Visual Basic"]),
            "![Python](https://img.shields.io/badge/Code-Python-blue.svg) \
             ![Visual Basic](https://img.shields.io/badge/Code-Visual%20Basic-blue.svg)"
        );
    }

    #[test]
    fn language_badges_empty() {
        assert_eq!(language_badges(&[]), "");
    }
}
