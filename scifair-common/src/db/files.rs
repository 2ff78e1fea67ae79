//! Project file rows (blob already stored; the row carries its URL)

use super::rows::{format_timestamp, parse_timestamp, parse_uuid};
use crate::models::{NewProjectFile, ProjectFile};
use crate::Result;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub async fn insert_file(pool: &SqlitePool, new: &NewProjectFile) -> Result<ProjectFile> {
    let file = ProjectFile {
        id: Uuid::new_v4(),
        project_id: new.project_id,
        file_name: new.file_name.clone(),
        file_type: new.file_type.clone(),
        file_url: new.file_url.clone(),
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO project_files (id, project_id, file_name, file_type, file_url, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(file.id.to_string())
    .bind(file.project_id.to_string())
    .bind(&file.file_name)
    .bind(&file.file_type)
    .bind(&file.file_url)
    .bind(format_timestamp(file.created_at))
    .execute(pool)
    .await?;

    Ok(file)
}

/// Files for `project_id`, newest first
pub async fn list_files(pool: &SqlitePool, project_id: Uuid) -> Result<Vec<ProjectFile>> {
    let rows = sqlx::query(
        r#"
        SELECT id, project_id, file_name, file_type, file_url, created_at
        FROM project_files
        WHERE project_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(project_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<ProjectFile> {
            let id: String = row.try_get("id")?;
            let project_id: String = row.try_get("project_id")?;
            let created_at: String = row.try_get("created_at")?;
            Ok(ProjectFile {
                id: parse_uuid(&id)?,
                project_id: parse_uuid(&project_id)?,
                file_name: row.try_get("file_name")?,
                file_type: row.try_get("file_type")?,
                file_url: row.try_get("file_url")?,
                created_at: parse_timestamp(&created_at)?,
            })
        })
        .collect()
}
