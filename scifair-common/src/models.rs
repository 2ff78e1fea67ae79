//! Data model: projects, attached files, data points and accounts

use crate::status::ProjectStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Metric name -> measured value. Keys are unique; order carries no meaning.
pub type ExperimentResults = BTreeMap<String, f64>;

/// A science fair project row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Assigned by the store on creation
    pub id: Uuid,
    /// Owning account
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub hypothesis: Option<String>,
    /// Display order only
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Append-only from the application's perspective
    #[serde(default)]
    pub observation_notes: Vec<String>,
    #[serde(default)]
    pub experiment_results: ExperimentResults,
    #[serde(default)]
    pub presentation_template: Option<String>,
    /// Assigned by the store on creation
    pub created_at: DateTime<Utc>,
}

/// The five fields produced by the AI generation flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectIdea {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub hypothesis: String,
    #[serde(default)]
    pub materials: Vec<String>,
}

/// Insert payload for a project row
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub hypothesis: Option<String>,
    pub materials: Vec<String>,
    pub status: ProjectStatus,
}

impl NewProject {
    /// Projects are only ever created from a generated idea, always as drafts
    pub fn from_idea(user_id: Uuid, idea: ProjectIdea) -> Self {
        let hypothesis = Some(idea.hypothesis).filter(|h| !h.trim().is_empty());
        Self {
            user_id,
            title: idea.title,
            description: idea.description,
            category: idea.category,
            hypothesis,
            materials: idea.materials,
            status: ProjectStatus::Draft,
        }
    }
}

/// File attached to a project (blob already uploaded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub id: Uuid,
    pub project_id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a file row; written only after the blob upload succeeded
#[derive(Debug, Clone, PartialEq)]
pub struct NewProjectFile {
    pub project_id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub file_url: String,
}

/// Individually timestamped measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub id: Uuid,
    pub project_id: Uuid,
    pub metric_name: String,
    pub value: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Insert payload for a data point row
#[derive(Debug, Clone, PartialEq)]
pub struct NewDataPoint {
    pub project_id: Uuid,
    pub metric_name: String,
    pub value: f64,
}

/// Selected project together with its files (newest first)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub files: Vec<ProjectFile>,
    pub progress: f64,
}

/// Signed-up account (credentials never leave the db layer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}
