//! Text blocks and placeholder values for the CV templates.
//!
//! The document renderer owns formatting; everything here produces plain
//! strings in the punctuation the templates expect.

use crate::domain::model::{
    CvData, Project, ProjectSection, Replacement, SkillCatalogue, SkillSection, INTRODUCTION_KEY,
};
use crate::domain::services::tokens::category_label;
use regex::Regex;
use std::sync::LazyLock;

pub const NAME: &str = "{{NAME}}";
pub const TITLE: &str = "{{TITLE}}";
pub const EDUCATION: &str = "{{EDUCATION_TEMPLATE}}";
pub const LANGUAGES: &str = "{{LANGUAGES}}";
pub const DOMAINS: &str = "{{DOMAINS_TEMPLATE}}";
pub const INTRO_PART_1: &str = "{{INTRO_PART_1}}";
pub const INTRO_PART_2: &str = "{{INTRO_PART_2}}";
pub const SKILLS_KEY: &str = "{{SKILLS_KEY}}";
pub const SKILLS_VALUE: &str = "{{SKILLS_VALUE}}";

pub const PROJECT_NAME: &str = "{{PROJECT_NAME}}";
pub const PROJECT_DESCRIPTION: &str = "{{PROJECT_DESCRIPTION}}";
pub const PROJECT_ROLES: &str = "{{PROJECT_ROLES}}";
pub const PROJECT_PERIOD: &str = "{{PROJECT_PERIOD}}";
pub const PROJECT_RESPONSIBILITIES: &str = "{{PROJECT_RESPONSIBILITIES}}";
// spelled as in the published templates
pub const PROJECT_ENVIRONMENT: &str = "{{PROJECT_ENVIROMENT}}";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[A-Z0-9_]+\}\}").expect("placeholder pattern is valid"));

fn with_final_period(mut text: String) -> String {
    if !text.ends_with('.') {
        text.push('.');
    }
    text
}

/// One summary block per skill category, `introduction` excluded.
pub fn skill_sections(catalogue: &SkillCatalogue) -> Vec<SkillSection> {
    catalogue
        .iter()
        .filter(|category| category.key != INTRODUCTION_KEY)
        .map(|category| SkillSection {
            header: category_label(&category.key),
            value: with_final_period(category.skills.join(", ")),
        })
        .collect()
}

/// Splits the introduction at its first sentence-ending period.
///
/// Periods between digits (`2.5 years`, `v1.2`) do not end a sentence. The
/// first part keeps its period; text without a split point is returned whole.
pub fn split_introduction(text: &str) -> (String, String) {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let split_at = chars.iter().enumerate().find_map(|(i, &(offset, ch))| {
        if ch != '.' {
            return None;
        }
        let digit_before = i > 0 && chars[i - 1].1.is_ascii_digit();
        let digit_after = chars.get(i + 1).is_some_and(|&(_, next)| next.is_ascii_digit());
        (!digit_before && !digit_after).then_some(offset)
    });

    match split_at {
        Some(offset) => (
            text[..=offset].trim().to_string(),
            text[offset + 1..].trim().to_string(),
        ),
        None => (text.to_string(), String::new()),
    }
}

pub fn project_section(project: &Project) -> ProjectSection {
    let items = project.responsibilities.items();
    let last = items.len().saturating_sub(1);
    let responsibilities = items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}{}", item, if i < last { ';' } else { '.' }))
        .collect();

    ProjectSection {
        name: project.name.clone(),
        description: project.description.clone(),
        roles: project.role.join(", "),
        period: project.period.to_string(),
        responsibilities,
        environment: with_final_period(project.environment.join(", ")),
    }
}

pub fn project_sections(projects: &[Project]) -> Vec<ProjectSection> {
    projects.iter().map(project_section).collect()
}

impl ProjectSection {
    /// Values for the `{{PROJECT_*}}` markers of one project table row.
    pub fn replacements(&self) -> Vec<Replacement> {
        vec![
            Replacement::new(PROJECT_NAME, &self.name),
            Replacement::new(PROJECT_DESCRIPTION, &self.description),
            Replacement::new(PROJECT_ROLES, &self.roles),
            Replacement::new(PROJECT_PERIOD, &self.period),
            Replacement::new(PROJECT_RESPONSIBILITIES, self.responsibilities.join("\n")),
            Replacement::new(PROJECT_ENVIRONMENT, &self.environment),
        ]
    }
}

/// Document-wide placeholder values taken from the personal and skills data.
pub fn placeholder_replacements(cv: &CvData) -> Vec<Replacement> {
    let personal = cv.personal_info.clone().unwrap_or_default();
    let basic = cv.skills.basic_information.clone().unwrap_or_default();
    let (intro_first, intro_rest) = split_introduction(cv.skills.introduction.as_deref().unwrap_or(""));

    let mut replacements = vec![
        Replacement::new(NAME, personal.name),
        Replacement::new(TITLE, personal.title),
        Replacement::new(EDUCATION, basic.education),
        Replacement::new(LANGUAGES, basic.languages.join(", ")),
        Replacement::new(DOMAINS, basic.domains.join(",\n")),
        Replacement::new(INTRO_PART_1, intro_first),
        Replacement::new(INTRO_PART_2, intro_rest),
    ];

    if let Some(first) = skill_sections(&cv.skills.catalogue).into_iter().next() {
        replacements.push(Replacement::new(SKILLS_KEY, first.header));
        replacements.push(Replacement::new(SKILLS_VALUE, first.value));
    }

    replacements
}

/// Replaces every occurrence of every placeholder in `template`.
pub fn render_template(template: &str, replacements: &[Replacement]) -> String {
    replacements
        .iter()
        .fold(template.to_string(), |text, replacement| {
            text.replace(&replacement.placeholder, &replacement.value)
        })
}

/// `{{...}}` markers still present in rendered text.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for marker in PLACEHOLDER.find_iter(text) {
        let marker = marker.as_str().to_string();
        if !found.contains(&marker) {
            found.push(marker);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Period, SkillCategory, TextOrList};

    #[test]
    fn test_skill_sections_add_final_period() {
        let catalogue = SkillCatalogue::new(vec![
            SkillCategory::new("programming_languages", ["Rust", "Go (basic)"]),
            SkillCategory::new("methodologies", ["Scrum", "Kanban."]),
        ]);

        let sections = skill_sections(&catalogue);

        assert_eq!(sections[0].header, "Programming Languages");
        assert_eq!(sections[0].value, "Rust, Go (basic).");
        assert_eq!(sections[1].value, "Scrum, Kanban.");
    }

    #[test]
    fn test_split_introduction() {
        assert_eq!(
            split_introduction("Senior engineer with 7.5 years. Loves Rust. Also Go."),
            (
                "Senior engineer with 7.5 years.".to_string(),
                "Loves Rust. Also Go.".to_string()
            )
        );
        assert_eq!(
            split_introduction("No sentence end here"),
            ("No sentence end here".to_string(), String::new())
        );
        assert_eq!(split_introduction(""), (String::new(), String::new()));
    }

    #[test]
    fn test_project_section_punctuation() {
        let project = Project {
            name: "Payments".to_string(),
            description: "Card processing".to_string(),
            role: TextOrList::List(vec!["Developer".into(), "Team Lead".into()]),
            period: Period::new("01.2020", "present"),
            responsibilities: TextOrList::List(vec!["Design APIs".into(), "Review code".into()]),
            environment: vec!["Rust".into(), "PostgreSQL".into()],
        };

        let section = project_section(&project);

        assert_eq!(section.roles, "Developer, Team Lead");
        assert_eq!(section.period, "01.2020 - present");
        assert_eq!(section.responsibilities, vec!["Design APIs;", "Review code."]);
        assert_eq!(section.environment, "Rust, PostgreSQL.");
        assert_eq!(section.replacements()[0], Replacement::new(PROJECT_NAME, "Payments"));
    }

    #[test]
    fn test_render_and_unresolved() {
        let replacements = vec![
            Replacement::new(NAME, "Jane Roe"),
            Replacement::new(TITLE, "Engineer"),
        ];

        let text = render_template("{{NAME}} - {{TITLE}} ({{NAME}}) {{PHONE}} {{PHONE}}", &replacements);

        assert_eq!(text, "Jane Roe - Engineer (Jane Roe) {{PHONE}} {{PHONE}}");
        assert_eq!(unresolved_placeholders(&text), vec!["{{PHONE}}"]);
    }
}
