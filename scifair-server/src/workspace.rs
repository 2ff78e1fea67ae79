//! Service operations behind the project endpoints
//!
//! Each operation loads the caller's own row, applies one mutation from
//! `scifair_common::journal` or the status machine, and writes the full field
//! back. Validation failures and no-ops return before any store write, so a
//! failed or empty operation never leaves a partial effect.

use crate::advisor::{Advisor, AgeGroup, DataAnalysis};
use crate::blobs::BlobStore;
use crate::error::{ApiError, ApiResult};
use scifair_common::export::ProjectExport;
use scifair_common::journal;
use scifair_common::models::{
    DataPoint, NewDataPoint, NewProject, NewProjectFile, Project, ProjectDetail, ProjectFile,
};
use scifair_common::{Direction, ProjectStore};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Body of `POST /api/projects/generate`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub interests: String,
    #[serde(default)]
    pub age_group: Option<AgeGroup>,
}

/// Outcome of a status step
#[derive(Debug, Clone, Serialize)]
pub struct Advance {
    pub project: Project,
    /// False when the project was already at the boundary (nothing written)
    pub changed: bool,
    pub progress: f64,
}

/// Load a project owned by `user_id`; another user's project is indistinguishable from a missing one
pub async fn load_project(store: &dyn ProjectStore, user_id: Uuid, id: Uuid) -> ApiResult<Project> {
    store
        .get_project(user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Project {} not found", id)))
}

/// Generate an idea with the advisor and store it as a new draft
pub async fn generate_project(
    store: &dyn ProjectStore,
    advisor: &dyn Advisor,
    user_id: Uuid,
    request: &GenerateRequest,
) -> ApiResult<Project> {
    let interests = request.interests.trim();
    if interests.is_empty() {
        return Err(ApiError::BadRequest(
            "Please describe your interests to generate a project".to_string(),
        ));
    }

    let idea = advisor.generate_project(interests, request.age_group).await?;
    let project = store
        .insert_project(&NewProject::from_idea(user_id, idea))
        .await?;

    info!(project_id = %project.id, title = %project.title, "Project created");
    Ok(project)
}

/// Move the project one stage forward or back
pub async fn advance_status(
    store: &dyn ProjectStore,
    user_id: Uuid,
    id: Uuid,
    direction: Direction,
) -> ApiResult<Advance> {
    let mut project = load_project(store, user_id, id).await?;

    let Some(next) = project.status.step(direction) else {
        return Ok(Advance {
            progress: project.status.progress(),
            project,
            changed: false,
        });
    };

    store.update_status(user_id, id, next).await?;
    info!(project_id = %id, from = %project.status, to = %next, "Project status changed");

    project.status = next;
    Ok(Advance {
        progress: next.progress(),
        project,
        changed: true,
    })
}

/// Fresh project row plus its files, fetched concurrently
pub async fn load_detail(store: &dyn ProjectStore, user_id: Uuid, id: Uuid) -> ApiResult<ProjectDetail> {
    let (files, project) = tokio::join!(store.list_files(id), store.get_project(user_id, id));

    let project = project?.ok_or_else(|| ApiError::NotFound(format!("Project {} not found", id)))?;
    let files = files?;

    Ok(ProjectDetail {
        progress: project.status.progress(),
        project,
        files,
    })
}

pub async fn add_note(
    store: &dyn ProjectStore,
    user_id: Uuid,
    id: Uuid,
    text: &str,
) -> ApiResult<Project> {
    let mut project = load_project(store, user_id, id).await?;

    if !journal::append_note(&mut project.observation_notes, text) {
        return Err(ApiError::BadRequest("Note cannot be empty".to_string()));
    }

    store
        .update_notes(user_id, id, &project.observation_notes)
        .await?;
    Ok(project)
}

pub async fn delete_note(
    store: &dyn ProjectStore,
    user_id: Uuid,
    id: Uuid,
    index: usize,
) -> ApiResult<Project> {
    let mut project = load_project(store, user_id, id).await?;

    if journal::remove_note(&mut project.observation_notes, index) {
        store
            .update_notes(user_id, id, &project.observation_notes)
            .await?;
    }
    Ok(project)
}

/// Record `name = value`, overwriting an existing measurement of the same name
pub async fn add_result(
    store: &dyn ProjectStore,
    user_id: Uuid,
    id: Uuid,
    name: &str,
    raw_value: &str,
) -> ApiResult<Project> {
    let name = journal::normalize_metric_name(name)?;
    let value = journal::parse_measurement(raw_value)?;
    let mut project = load_project(store, user_id, id).await?;

    journal::merge_result(&mut project.experiment_results, name, value);
    store
        .update_results(user_id, id, &project.experiment_results)
        .await?;
    Ok(project)
}

pub async fn delete_result(
    store: &dyn ProjectStore,
    user_id: Uuid,
    id: Uuid,
    name: &str,
) -> ApiResult<Project> {
    let name = journal::normalize_metric_name(name)?;
    let mut project = load_project(store, user_id, id).await?;

    if journal::remove_result(&mut project.experiment_results, &name) {
        store
            .update_results(user_id, id, &project.experiment_results)
            .await?;
    }
    Ok(project)
}

pub async fn add_data_point(
    store: &dyn ProjectStore,
    user_id: Uuid,
    id: Uuid,
    metric_name: &str,
    raw_value: &str,
) -> ApiResult<DataPoint> {
    let metric_name = journal::normalize_metric_name(metric_name)?;
    let value = journal::parse_measurement(raw_value)?;
    load_project(store, user_id, id).await?;

    let point = store
        .insert_data_point(&NewDataPoint {
            project_id: id,
            metric_name,
            value,
        })
        .await?;
    Ok(point)
}

pub async fn list_data_points(
    store: &dyn ProjectStore,
    user_id: Uuid,
    id: Uuid,
) -> ApiResult<Vec<DataPoint>> {
    load_project(store, user_id, id).await?;
    Ok(store.list_data_points(id).await?)
}

pub async fn list_files(
    store: &dyn ProjectStore,
    user_id: Uuid,
    id: Uuid,
) -> ApiResult<Vec<ProjectFile>> {
    load_project(store, user_id, id).await?;
    Ok(store.list_files(id).await?)
}

/// Store the blob, then record it. No row is written if the blob write fails.
pub async fn upload_file(
    store: &dyn ProjectStore,
    blobs: &BlobStore,
    user_id: Uuid,
    id: Uuid,
    file_name: &str,
    file_type: &str,
    bytes: &[u8],
) -> ApiResult<ProjectFile> {
    let file_name = file_name.trim();
    if file_name.is_empty() {
        return Err(ApiError::BadRequest("File name cannot be empty".to_string()));
    }
    if bytes.is_empty() {
        return Err(ApiError::BadRequest("Uploaded file is empty".to_string()));
    }
    load_project(store, user_id, id).await?;

    let file_url = blobs.put(id, file_name, bytes).await?;
    let file = store
        .insert_file(&NewProjectFile {
            project_id: id,
            file_name: file_name.to_string(),
            file_type: file_type.to_string(),
            file_url,
        })
        .await?;

    info!(project_id = %id, file = %file.file_name, "File uploaded");
    Ok(file)
}

/// Removes the row; attached files and their blobs stay where they are
pub async fn delete_project(store: &dyn ProjectStore, user_id: Uuid, id: Uuid) -> ApiResult<()> {
    store.delete_project(user_id, id).await?;
    info!(project_id = %id, "Project deleted");
    Ok(())
}

pub async fn export_project(
    store: &dyn ProjectStore,
    user_id: Uuid,
    id: Uuid,
) -> ApiResult<ProjectExport> {
    let project = load_project(store, user_id, id).await?;
    let (files, data_points) = tokio::join!(store.list_files(id), store.list_data_points(id));
    Ok(ProjectExport::new(project, files?, data_points?))
}

pub async fn analyze_data(
    store: &dyn ProjectStore,
    advisor: &dyn Advisor,
    user_id: Uuid,
    id: Uuid,
) -> ApiResult<DataAnalysis> {
    let project = load_project(store, user_id, id).await?;
    if project.experiment_results.is_empty() {
        return Err(ApiError::BadRequest(
            "Add experiment results before requesting an analysis".to_string(),
        ));
    }
    Ok(advisor
        .analyze_data(&project.title, &project.experiment_results)
        .await?)
}

pub async fn plan_experiment(
    store: &dyn ProjectStore,
    advisor: &dyn Advisor,
    user_id: Uuid,
    id: Uuid,
) -> ApiResult<String> {
    let project = load_project(store, user_id, id).await?;
    Ok(advisor.plan_experiment(&project).await?)
}

pub async fn analyze_project(
    store: &dyn ProjectStore,
    advisor: &dyn Advisor,
    user_id: Uuid,
    id: Uuid,
) -> ApiResult<String> {
    let project = load_project(store, user_id, id).await?;
    Ok(advisor.analyze_project(&project).await?)
}

pub async fn research_question(
    store: &dyn ProjectStore,
    advisor: &dyn Advisor,
    user_id: Uuid,
    id: Uuid,
    question: &str,
) -> ApiResult<String> {
    let question = question.trim();
    if question.is_empty() {
        return Err(ApiError::BadRequest("Please enter a question".to_string()));
    }
    let project = load_project(store, user_id, id).await?;
    Ok(advisor.research_question(&project, question).await?)
}
