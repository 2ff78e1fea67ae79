//! OpenAI-compatible chat completions client

use super::{prompts, Advisor, AdvisorError, AgeGroup, DataAnalysis};
use async_trait::async_trait;
use scifair_common::config::AdvisorConfig;
use scifair_common::models::{ExperimentResults, Project, ProjectIdea};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const USER_AGENT: &str = concat!("scifair/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Advisor backed by a hosted chat completions endpoint
pub struct OpenAiAdvisor {
    http_client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiAdvisor {
    /// Build the client. A missing key is accepted here and reported per call.
    pub fn new(config: &AdvisorConfig, api_key: Option<String>) -> Result<Self, AdvisorError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdvisorError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn complete(
        &self,
        system: &str,
        user: &str,
        json_mode: bool,
    ) -> Result<String, AdvisorError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AdvisorError::NotConfigured("no language model API key is set".to_string())
        })?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            response_format: json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        tracing::debug!(model = %self.model, json_mode, "Sending advisor request");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AdvisorError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::MalformedResponse(e.to_string()))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                AdvisorError::MalformedResponse("response contained no message".to_string())
            })?;

        tracing::debug!(chars = content.len(), "Advisor response received");
        Ok(content)
    }
}

/// Pull `error.message` out of an error body, else the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// Parse a JSON object reply, tolerating a surrounding markdown code fence
pub(crate) fn parse_json_reply<T: DeserializeOwned>(content: &str) -> Result<T, AdvisorError> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim()).map_err(|e| AdvisorError::MalformedResponse(e.to_string()))
}

fn validate_idea(idea: ProjectIdea) -> Result<ProjectIdea, AdvisorError> {
    if idea.title.trim().is_empty() {
        return Err(AdvisorError::MalformedResponse(
            "generated project has no title".to_string(),
        ));
    }
    Ok(idea)
}

#[async_trait]
impl Advisor for OpenAiAdvisor {
    async fn generate_project(
        &self,
        interests: &str,
        age_group: Option<AgeGroup>,
    ) -> Result<ProjectIdea, AdvisorError> {
        let user = prompts::generate_user(interests, age_group);
        let content = self.complete(prompts::GENERATE_SYSTEM, &user, true).await?;
        let idea = validate_idea(parse_json_reply(&content)?)?;

        tracing::info!(title = %idea.title, category = %idea.category, "Project idea generated");
        Ok(idea)
    }

    async fn analyze_data(
        &self,
        project_title: &str,
        results: &ExperimentResults,
    ) -> Result<DataAnalysis, AdvisorError> {
        let user = prompts::analyze_data_user(project_title, results);
        let content = self
            .complete(prompts::ANALYZE_DATA_SYSTEM, &user, true)
            .await?;
        parse_json_reply(&content)
    }

    async fn plan_experiment(&self, project: &Project) -> Result<String, AdvisorError> {
        self.complete(prompts::PLAN_SYSTEM, &prompts::plan_user(project), false)
            .await
    }

    async fn analyze_project(&self, project: &Project) -> Result<String, AdvisorError> {
        self.complete(
            prompts::ANALYZE_PROJECT_SYSTEM,
            &prompts::analyze_project_user(project),
            false,
        )
        .await
    }

    async fn research_question(
        &self,
        project: &Project,
        question: &str,
    ) -> Result<String, AdvisorError> {
        self.complete(
            prompts::RESEARCH_SYSTEM,
            &prompts::research_user(project, question),
            false,
        )
        .await
    }
}
