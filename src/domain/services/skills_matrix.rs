use crate::domain::model::{Project, SkillCatalogue, SkillRow, YearSpan, INTRODUCTION_KEY};
use crate::domain::services::intervals::{last_used, merge_intervals, total_years};
use crate::domain::services::matcher::tech_in_environment;
use crate::domain::services::period::parse_period;
use crate::domain::services::tokens::{category_label, normalize_skill_name, parse_environment};
use crate::utils::error::Result;

/// Environment tokens and year span of one project, computed once per table.
#[derive(Debug, Clone)]
struct ProjectEvidence {
    tokens: Vec<String>,
    span: YearSpan,
}

/// Builds the skills matrix rows for `catalogue` from the project history.
///
/// Rows follow catalogue order. Only the first row of each category carries
/// the category label; the rest leave it empty so the table writer can merge
/// the category cells. Fails on the first project whose period is malformed.
pub fn build_skills_table(
    catalogue: &SkillCatalogue,
    projects: &[Project],
    current_year: i32,
) -> Result<Vec<SkillRow>> {
    let evidence = projects
        .iter()
        .map(|project| -> Result<ProjectEvidence> {
            let span = parse_period(&project.period, current_year).inspect_err(|e| {
                tracing::error!("Project '{}' has an unusable period: {}", project.name, e);
            })?;
            Ok(ProjectEvidence {
                tokens: parse_environment(&project.environment),
                span,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut rows = Vec::new();
    for category in catalogue.iter() {
        if category.key == INTRODUCTION_KEY {
            continue;
        }

        let label = category_label(&category.key);
        for (index, raw_skill) in category.skills.iter().enumerate() {
            let skill = normalize_skill_name(raw_skill);
            let spans: Vec<YearSpan> = evidence
                .iter()
                .filter(|project| tech_in_environment(&skill, &project.tokens))
                .map(|project| project.span)
                .collect();
            let merged = merge_intervals(spans);

            let (total, last) = match last_used(&merged) {
                Some(last) => (Some(total_years(&merged)), Some(last)),
                None => (None, None),
            };
            tracing::debug!(
                "Skill '{}' matched {} merged span(s), total={:?}, last_used={:?}",
                skill,
                merged.len(),
                total,
                last
            );

            rows.push(SkillRow {
                category: if index == 0 { label.clone() } else { String::new() },
                skill,
                total_years: total,
                last_used: last,
            });
        }
    }

    Ok(rows)
}
