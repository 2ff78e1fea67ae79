//! Project row operations
//!
//! Every query is scoped by `user_id`; another user's project behaves exactly
//! like a missing one. Updates always write the complete field value.

use super::rows::{format_timestamp, from_json_text, parse_timestamp, parse_uuid, to_json_text};
use crate::models::{ExperimentResults, NewProject, Project};
use crate::status::ProjectStatus;
use crate::{Error, Result};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const PROJECT_COLUMNS: &str = "id, user_id, title, description, category, hypothesis, materials, \
     status, observation_notes, experiment_results, presentation_template, created_at";

fn project_from_row(row: &SqliteRow) -> Result<Project> {
    let id: String = row.try_get("id")?;
    let user_id: String = row.try_get("user_id")?;
    let status: Option<String> = row.try_get("status")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Project {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        category: row.try_get("category")?,
        hypothesis: row.try_get("hypothesis")?,
        materials: from_json_text(row.try_get("materials")?)?,
        status: status
            .as_deref()
            .map(ProjectStatus::from_stored)
            .unwrap_or_default(),
        observation_notes: from_json_text(row.try_get("observation_notes")?)?,
        experiment_results: from_json_text(row.try_get("experiment_results")?)?,
        presentation_template: row.try_get("presentation_template")?,
        created_at: parse_timestamp(&created_at)?,
    })
}

/// Insert a new project; id and creation time are assigned here
pub async fn insert_project(pool: &SqlitePool, new: &NewProject) -> Result<Project> {
    let project = Project {
        id: Uuid::new_v4(),
        user_id: new.user_id,
        title: new.title.clone(),
        description: new.description.clone(),
        category: new.category.clone(),
        hypothesis: new.hypothesis.clone(),
        materials: new.materials.clone(),
        status: new.status,
        observation_notes: Vec::new(),
        experiment_results: ExperimentResults::new(),
        presentation_template: None,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO projects (id, user_id, title, description, category, hypothesis,
                              materials, status, observation_notes, experiment_results, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(project.id.to_string())
    .bind(project.user_id.to_string())
    .bind(&project.title)
    .bind(&project.description)
    .bind(&project.category)
    .bind(&project.hypothesis)
    .bind(to_json_text(&project.materials)?)
    .bind(project.status.as_str())
    .bind(to_json_text(&project.observation_notes)?)
    .bind(to_json_text(&project.experiment_results)?)
    .bind(format_timestamp(project.created_at))
    .execute(pool)
    .await?;

    Ok(project)
}

/// All projects owned by `user_id`, newest first
pub async fn list_projects(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Project>> {
    let sql = format!(
        "SELECT {} FROM projects WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
        PROJECT_COLUMNS
    );
    let rows = sqlx::query(&sql)
        .bind(user_id.to_string())
        .fetch_all(pool)
        .await?;

    rows.iter().map(project_from_row).collect()
}

pub async fn get_project(pool: &SqlitePool, user_id: Uuid, id: Uuid) -> Result<Option<Project>> {
    let sql = format!(
        "SELECT {} FROM projects WHERE id = ? AND user_id = ?",
        PROJECT_COLUMNS
    );
    let row = sqlx::query(&sql)
        .bind(id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(project_from_row).transpose()
}

async fn update_column(
    pool: &SqlitePool,
    user_id: Uuid,
    id: Uuid,
    column: &'static str,
    value: String,
) -> Result<()> {
    let sql = format!("UPDATE projects SET {} = ? WHERE id = ? AND user_id = ?", column);
    let result = sqlx::query(&sql)
        .bind(value)
        .bind(id.to_string())
        .bind(user_id.to_string())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Project {}", id)));
    }
    Ok(())
}

pub async fn update_status(
    pool: &SqlitePool,
    user_id: Uuid,
    id: Uuid,
    status: ProjectStatus,
) -> Result<()> {
    update_column(pool, user_id, id, "status", status.as_str().to_string()).await
}

/// Overwrite the full notes sequence
pub async fn update_notes(pool: &SqlitePool, user_id: Uuid, id: Uuid, notes: &[String]) -> Result<()> {
    update_column(pool, user_id, id, "observation_notes", to_json_text(&notes)?).await
}

/// Overwrite the full results mapping
pub async fn update_results(
    pool: &SqlitePool,
    user_id: Uuid,
    id: Uuid,
    results: &ExperimentResults,
) -> Result<()> {
    update_column(pool, user_id, id, "experiment_results", to_json_text(results)?).await
}

/// Delete the project row only; file rows and blobs are left in place
pub async fn delete_project(pool: &SqlitePool, user_id: Uuid, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM projects WHERE id = ? AND user_id = ?")
        .bind(id.to_string())
        .bind(user_id.to_string())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Project {}", id)));
    }
    Ok(())
}
