//! Prompt templates

use super::AgeGroup;
use scifair_common::models::{ExperimentResults, Project};

pub(super) const GENERATE_SYSTEM: &str = r#"You are a science fair project advisor. Generate creative and educational project ideas based on student interests.
Return the response as a JSON object with exactly this structure:
{
  "title": "Project title",
  "description": "Brief project description",
  "category": "Project category (e.g., Biology, Physics, Chemistry, etc.)",
  "hypothesis": "Scientific hypothesis to test",
  "materials": ["Array of required materials"]
}"#;

pub(super) const ANALYZE_DATA_SYSTEM: &str = r#"You are a scientific data analyst assistant. Analyze experimental data and provide insights and recommendations in a clear, concise format.
Return the response as a JSON object with exactly two string fields:
{
  "insights": "Statistical analysis, patterns and correlations found in the data",
  "recommendations": "Suggestions for improvement and future experiments"
}"#;

pub(super) const PLAN_SYSTEM: &str = "You are a scientific experiment planning assistant. Help design detailed experiment procedures that are safe, practical, and scientifically sound for science fair projects.";

pub(super) const ANALYZE_PROJECT_SYSTEM: &str = "You are a science fair mentor. Review a student's project design and lab notes and give encouraging, specific suggestions to strengthen it.";

pub(super) const RESEARCH_SYSTEM: &str = "You are a research assistant for student science fair projects. Answer scientific questions accurately, at a level a student can follow, and suggest where to learn more.";

pub(super) fn generate_user(interests: &str, age_group: Option<AgeGroup>) -> String {
    match age_group {
        Some(group) => format!(
            "Generate a science fair project idea related to: {}\nThe project should be suitable for {}.",
            interests,
            group.audience()
        ),
        None => format!("Generate a science fair project idea related to: {}", interests),
    }
}

pub(super) fn analyze_data_user(project_title: &str, results: &ExperimentResults) -> String {
    let data_points = results
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Please analyze this experimental data for the project \"{}\":\n\n\
         Data points:\n{}\n\n\
         Cover statistical analysis, pattern identification, potential correlations, \
         suggestions for improvement and recommendations for future experiments.",
        project_title, data_points
    )
}

fn project_summary(project: &Project) -> String {
    format!(
        "Title: {}\nDescription: {}\nHypothesis: {}\nAvailable Materials: {}",
        project.title,
        project.description,
        project.hypothesis.as_deref().unwrap_or("Not specified"),
        project.materials.join(", ")
    )
}

pub(super) fn plan_user(project: &Project) -> String {
    format!(
        "Please create a detailed experiment plan for this project:\n\n{}\n\n\
         Please provide:\n\
         1. Step-by-step experimental procedure\n\
         2. List of control and test variables\n\
         3. Data collection methods and measurements\n\
         4. Timeline and schedule recommendations\n\
         5. Suggested data visualization methods\n\
         6. Safety considerations and precautions\n\
         7. Tips for maintaining experimental consistency",
        project_summary(project)
    )
}

pub(super) fn analyze_project_user(project: &Project) -> String {
    let notes = if project.observation_notes.is_empty() {
        "No observations recorded yet.".to_string()
    } else {
        project
            .observation_notes
            .iter()
            .map(|note| format!("- {}", note))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Please review this science fair project:\n\n{}\nCategory: {}\n\nLab notes:\n{}\n\n\
         Point out strengths, weaknesses in the experimental design, and concrete next steps.",
        project_summary(project),
        project.category,
        notes
    )
}

pub(super) fn research_user(project: &Project, question: &str) -> String {
    format!(
        "Project: {}\nDescription: {}\n\nQuestion: {}",
        project.title, project.description, question
    )
}
