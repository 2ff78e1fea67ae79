//! Advisor double returning canned answers

use async_trait::async_trait;
use scifair_common::models::{ExperimentResults, Project, ProjectIdea};
use scifair_server::advisor::{Advisor, AdvisorError, AgeGroup, DataAnalysis};
use std::sync::Mutex;

/// Arguments of one advisor call
#[derive(Debug, Clone, PartialEq)]
pub enum AdvisorCall {
    Generate(String, Option<AgeGroup>),
    AnalyzeData(String, ExperimentResults),
    Plan(String),
    AnalyzeProject(String, Vec<String>),
    Research(String, String),
}

pub struct ScriptedAdvisor {
    pub idea: ProjectIdea,
    pub fail: bool,
    calls: Mutex<Vec<AdvisorCall>>,
}

impl ScriptedAdvisor {
    pub fn new() -> Self {
        Self {
            idea: volcano_idea(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_idea(idea: ProjectIdea) -> Self {
        Self {
            idea,
            ..Self::new()
        }
    }

    /// Every call fails with a malformed-response error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<AdvisorCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: AdvisorCall) -> Result<(), AdvisorError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(AdvisorError::MalformedResponse(
                "expected value at line 1 column 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn volcano_idea() -> ProjectIdea {
    ProjectIdea {
        title: "Volcano Eruption Chemistry".to_string(),
        description: "Compare eruption heights with different reactant ratios".to_string(),
        category: "Chemistry".to_string(),
        hypothesis: "More baking soda produces a taller eruption".to_string(),
        materials: vec![
            "Baking soda".to_string(),
            "Vinegar".to_string(),
            "Measuring cups".to_string(),
        ],
    }
}

#[async_trait]
impl Advisor for ScriptedAdvisor {
    async fn generate_project(
        &self,
        interests: &str,
        age_group: Option<AgeGroup>,
    ) -> Result<ProjectIdea, AdvisorError> {
        self.record(AdvisorCall::Generate(interests.to_string(), age_group))?;
        Ok(self.idea.clone())
    }

    async fn analyze_data(
        &self,
        project_title: &str,
        results: &ExperimentResults,
    ) -> Result<DataAnalysis, AdvisorError> {
        self.record(AdvisorCall::AnalyzeData(
            project_title.to_string(),
            results.clone(),
        ))?;
        Ok(DataAnalysis {
            insights: format!("{} measurements recorded", results.len()),
            recommendations: "Repeat each trial three times".to_string(),
        })
    }

    async fn plan_experiment(&self, project: &Project) -> Result<String, AdvisorError> {
        self.record(AdvisorCall::Plan(project.title.clone()))?;
        Ok("1. Measure the baking soda\n2. Add vinegar".to_string())
    }

    async fn analyze_project(&self, project: &Project) -> Result<String, AdvisorError> {
        self.record(AdvisorCall::AnalyzeProject(
            project.title.clone(),
            project.observation_notes.clone(),
        ))?;
        Ok("Strong hypothesis; add a control group".to_string())
    }

    async fn research_question(
        &self,
        project: &Project,
        question: &str,
    ) -> Result<String, AdvisorError> {
        self.record(AdvisorCall::Research(
            project.title.clone(),
            question.to_string(),
        ))?;
        Ok("Carbon dioxide gas builds pressure".to_string())
    }
}
