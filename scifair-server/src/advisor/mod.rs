//! AI advisor: project generation and analysis via a hosted language model
//!
//! Every call is a single-shot request/response with no retry. Structured
//! answers (generated projects, data analyses) are requested as JSON objects
//! and a body that does not parse is an error, never a placeholder.

mod openai;
mod prompts;

pub use openai::OpenAiAdvisor;

use async_trait::async_trait;
use scifair_common::models::{ExperimentResults, Project, ProjectIdea};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Advisor failures, all surfaced to the user verbatim
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// No API key configured for the language model
    #[error("AI advisor is not configured: {0}")]
    NotConfigured(String),

    /// Network or transport failure
    #[error("AI request failed: {0}")]
    Transport(String),

    /// Non-2xx response from the model endpoint
    #[error("AI service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body missing or not in the requested shape
    #[error("AI response could not be parsed: {0}")]
    MalformedResponse(String),
}

/// Target audience for generated projects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Elementary,
    Middle,
    High,
}

impl AgeGroup {
    pub fn audience(self) -> &'static str {
        match self {
            AgeGroup::Elementary => "an elementary school student (ages 6-10)",
            AgeGroup::Middle => "a middle school student (ages 11-14)",
            AgeGroup::High => "a high school student (ages 14-18)",
        }
    }
}

/// Two-section analysis of a project's experiment results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataAnalysis {
    pub insights: String,
    pub recommendations: String,
}

/// Language model operations used by the service
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Generate a project idea from free-text interests
    async fn generate_project(
        &self,
        interests: &str,
        age_group: Option<AgeGroup>,
    ) -> Result<ProjectIdea, AdvisorError>;

    /// Insights and recommendations for recorded results
    async fn analyze_data(
        &self,
        project_title: &str,
        results: &ExperimentResults,
    ) -> Result<DataAnalysis, AdvisorError>;

    /// Step-by-step experiment plan (free text)
    async fn plan_experiment(&self, project: &Project) -> Result<String, AdvisorError>;

    /// Feedback on the project design and its lab notes (free text)
    async fn analyze_project(&self, project: &Project) -> Result<String, AdvisorError>;

    /// Answer a student's research question about the project (free text)
    async fn research_question(
        &self,
        project: &Project,
        question: &str,
    ) -> Result<String, AdvisorError>;
}
