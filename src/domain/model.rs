use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Category key that holds prose rather than skills.
pub const INTRODUCTION_KEY: &str = "introduction";

/// Key of the basic information block inside the skills section.
pub const BASIC_INFORMATION_KEY: &str = "basic_information";

/// The whole CV data file.
#[derive(Debug, Clone, Deserialize)]
pub struct CvData {
    #[serde(default)]
    pub personal_info: Option<PersonalInfo>,
    pub skills: SkillsSection,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BasicInformation {
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub languages: TextOrList,
    #[serde(default)]
    pub domains: TextOrList,
}

/// A field that data files write either as a single string or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    Text(String),
    List(Vec<String>),
}

impl Default for TextOrList {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl TextOrList {
    pub fn join(&self, separator: &str) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::List(items) => items.join(separator),
        }
    }

    /// Items of the field; a non-empty string counts as a single item.
    pub fn items(&self) -> Vec<&str> {
        match self {
            Self::Text(text) if text.trim().is_empty() => Vec::new(),
            Self::Text(text) => vec![text.as_str()],
            Self::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

/// The `skills` object of the data file.
///
/// Two layouts are accepted. The flat one keeps categories directly under
/// `skills`; the nested one keeps them under `skills.skills` next to the
/// `introduction` and `basic_information` blocks. When a nested `skills`
/// object is present it is the catalogue and top-level arrays are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct SkillsSection {
    pub introduction: Option<String>,
    pub basic_information: Option<BasicInformation>,
    pub catalogue: SkillCatalogue,
}

impl TryFrom<Map<String, Value>> for SkillsSection {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> std::result::Result<Self, Self::Error> {
        let mut introduction = None;
        let mut basic_information = None;
        let mut nested = None;
        let mut flat = Vec::new();

        for (key, value) in map {
            match key.as_str() {
                INTRODUCTION_KEY => {
                    introduction = match value {
                        Value::String(text) => Some(text),
                        Value::Null => None,
                        other => {
                            tracing::warn!("Ignoring non-text skills introduction: {}", other);
                            None
                        }
                    }
                }
                BASIC_INFORMATION_KEY => {
                    basic_information =
                        Some(serde_json::from_value(value).map_err(|e| e.to_string())?);
                }
                "skills" if value.is_object() => nested = Some(value),
                _ => flat.push((key, value)),
            }
        }

        let catalogue = match nested {
            Some(Value::Object(inner)) => SkillCatalogue::from_entries(inner)?,
            _ => SkillCatalogue::from_entries(flat)?,
        };

        Ok(Self {
            introduction,
            basic_information,
            catalogue,
        })
    }
}

/// Skill categories in declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillCatalogue {
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCategory {
    pub key: String,
    pub skills: Vec<String>,
}

impl SkillCatalogue {
    pub fn new(categories: Vec<SkillCategory>) -> Self {
        Self { categories }
    }

    /// Builds a catalogue from JSON entries, skipping `introduction`.
    pub fn from_entries<I>(entries: I) -> std::result::Result<Self, String>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut categories = Vec::new();
        for (key, value) in entries {
            if key == INTRODUCTION_KEY {
                continue;
            }
            let Value::Array(items) = value else {
                return Err(format!("skill category `{}` must be a list of strings", key));
            };
            let skills = items
                .into_iter()
                .map(|item| match item {
                    Value::String(skill) => Ok(skill),
                    other => Err(format!(
                        "skill category `{}` contains a non-string entry: {}",
                        key, other
                    )),
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            categories.push(SkillCategory { key, skills });
        }
        Ok(Self { categories })
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillCategory> {
        self.categories.iter()
    }
}

impl SkillCategory {
    pub fn new<K: Into<String>, S: Into<String>>(key: K, skills: impl IntoIterator<Item = S>) -> Self {
        Self {
            key: key.into(),
            skills: skills.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub role: TextOrList,
    pub period: Period,
    #[serde(default)]
    pub responsibilities: TextOrList,
    #[serde(default)]
    pub environment: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: String,
    pub end: String,
}

impl Period {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Closed, inclusive range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearSpan {
    pub start: i32,
    pub end: i32,
}

impl YearSpan {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Number of calendar years covered, counting both ends.
    pub fn years(&self) -> i32 {
        self.end - self.start + 1
    }
}

/// Placeholder shown in the years / last-used columns when nothing matched.
pub const NO_EXPERIENCE: &str = "-";

/// One row of the skills matrix table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRow {
    /// Category label on the first row of a category block, empty otherwise.
    pub category: String,
    pub skill: String,
    pub total_years: Option<i32>,
    pub last_used: Option<i32>,
}

impl SkillRow {
    pub fn cells(&self) -> [String; 4] {
        let dash = || NO_EXPERIENCE.to_string();
        [
            self.category.clone(),
            self.skill.clone(),
            self.total_years.map_or_else(dash, |years| years.to_string()),
            self.last_used.map_or_else(dash, |year| year.to_string()),
        ]
    }
}

impl Serialize for SkillRow {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.cells().serialize(serializer)
    }
}

/// A `{{PLACEHOLDER}}` and the text that replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub placeholder: String,
    pub value: String,
}

impl Replacement {
    pub fn new(placeholder: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            value: value.into(),
        }
    }
}

/// A skills summary block: bold header plus comma-separated skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillSection {
    pub header: String,
    pub value: String,
}

/// Text of one project entry, ready to be placed into a template row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSection {
    pub name: String,
    pub description: String,
    pub roles: String,
    pub period: String,
    pub responsibilities: Vec<String>,
    pub environment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssemblyResult {
    pub current_year: i32,
    pub skills_matrix: Vec<SkillRow>,
    pub skill_sections: Vec<SkillSection>,
    pub project_sections: Vec<ProjectSection>,
    pub replacements: Vec<Replacement>,
    #[serde(skip)]
    pub csv_output: String,
    #[serde(skip)]
    pub tsv_output: String,
    #[serde(skip)]
    pub rendered_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_skills_layout_keeps_declared_order() {
        let data: CvData = serde_json::from_value(serde_json::json!({
            "skills": {
                "languages": ["Python", "Go (basic)"],
                "introduction": "Backend engineer. Likes Rust.",
                "databases": ["PostgreSQL"],
                "cloud_platforms": ["AWS"]
            },
            "projects": []
        }))
        .unwrap();

        let keys: Vec<&str> = data.skills.catalogue.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["languages", "databases", "cloud_platforms"]);
        assert_eq!(
            data.skills.introduction.as_deref(),
            Some("Backend engineer. Likes Rust.")
        );
    }

    #[test]
    fn test_non_text_introduction_is_ignored() {
        let data: CvData = serde_json::from_value(serde_json::json!({
            "skills": {"introduction": ["Backend dev."], "languages": ["Python"]},
            "projects": []
        }))
        .unwrap();

        assert!(data.skills.introduction.is_none());
        let keys: Vec<&str> = data.skills.catalogue.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["languages"]);
    }

    #[test]
    fn test_nested_skills_layout() {
        let data: CvData = serde_json::from_value(serde_json::json!({
            "personal_info": {"name": "Jane Roe", "title": "Engineer"},
            "skills": {
                "introduction": "Intro.",
                "basic_information": {
                    "education": "MSc",
                    "languages": ["English", "German"],
                    "domains": "Fintech"
                },
                "skills": {"frameworks": ["Django"], "languages": ["Python"]}
            },
            "projects": [{
                "name": "Billing",
                "period": {"start": "01.2020", "end": "present"}
            }]
        }))
        .unwrap();

        let keys: Vec<&str> = data.skills.catalogue.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["frameworks", "languages"]);
        let basic = data.skills.basic_information.unwrap();
        assert_eq!(basic.languages.join(", "), "English, German");
        assert_eq!(basic.domains, TextOrList::Text("Fintech".to_string()));
        assert!(data.projects[0].environment.is_empty());
        assert_eq!(data.projects[0].period.to_string(), "01.2020 - present");
    }

    #[test]
    fn test_non_list_category_is_rejected() {
        let result: std::result::Result<CvData, _> = serde_json::from_value(serde_json::json!({
            "skills": {"languages": "Python"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_skill_row_cells_use_dashes() {
        let row = SkillRow {
            category: String::new(),
            skill: "Haskell".to_string(),
            total_years: None,
            last_used: None,
        };
        assert_eq!(row.cells(), ["", "Haskell", "-", "-"].map(String::from));
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"["","Haskell","-","-"]"#
        );
    }

    #[test]
    fn test_text_or_list_items() {
        assert!(TextOrList::default().items().is_empty());
        assert_eq!(TextOrList::Text("Lead".into()).items(), vec!["Lead"]);
        assert_eq!(YearSpan::new(2018, 2021).years(), 4);
    }
}
