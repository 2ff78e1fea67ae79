//! Project store seam
//!
//! Handlers and service operations talk to [`ProjectStore`], never to SQL
//! directly. [`SqliteStore`] is the production implementation; tests wrap it
//! to observe exactly which writes an operation issues.

use crate::db;
use crate::models::{
    DataPoint, ExperimentResults, NewDataPoint, NewProject, NewProjectFile, Project, ProjectFile,
};
use crate::status::ProjectStatus;
use crate::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Create/read/update/delete access to projects, their files and data points
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn insert_project(&self, project: &NewProject) -> Result<Project>;

    /// Newest first
    async fn list_projects(&self, user_id: Uuid) -> Result<Vec<Project>>;

    async fn get_project(&self, user_id: Uuid, id: Uuid) -> Result<Option<Project>>;

    async fn update_status(&self, user_id: Uuid, id: Uuid, status: ProjectStatus) -> Result<()>;

    /// Overwrites the whole sequence
    async fn update_notes(&self, user_id: Uuid, id: Uuid, notes: &[String]) -> Result<()>;

    /// Overwrites the whole mapping
    async fn update_results(&self, user_id: Uuid, id: Uuid, results: &ExperimentResults)
        -> Result<()>;

    /// Removes the row only
    async fn delete_project(&self, user_id: Uuid, id: Uuid) -> Result<()>;

    async fn insert_file(&self, file: &NewProjectFile) -> Result<ProjectFile>;

    /// Newest first
    async fn list_files(&self, project_id: Uuid) -> Result<Vec<ProjectFile>>;

    async fn insert_data_point(&self, point: &NewDataPoint) -> Result<DataPoint>;

    async fn list_data_points(&self, project_id: Uuid) -> Result<Vec<DataPoint>>;
}

/// SQLite-backed store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for SqliteStore {
    async fn insert_project(&self, project: &NewProject) -> Result<Project> {
        db::projects::insert_project(&self.pool, project).await
    }

    async fn list_projects(&self, user_id: Uuid) -> Result<Vec<Project>> {
        db::projects::list_projects(&self.pool, user_id).await
    }

    async fn get_project(&self, user_id: Uuid, id: Uuid) -> Result<Option<Project>> {
        db::projects::get_project(&self.pool, user_id, id).await
    }

    async fn update_status(&self, user_id: Uuid, id: Uuid, status: ProjectStatus) -> Result<()> {
        db::projects::update_status(&self.pool, user_id, id, status).await
    }

    async fn update_notes(&self, user_id: Uuid, id: Uuid, notes: &[String]) -> Result<()> {
        db::projects::update_notes(&self.pool, user_id, id, notes).await
    }

    async fn update_results(
        &self,
        user_id: Uuid,
        id: Uuid,
        results: &ExperimentResults,
    ) -> Result<()> {
        db::projects::update_results(&self.pool, user_id, id, results).await
    }

    async fn delete_project(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        db::projects::delete_project(&self.pool, user_id, id).await
    }

    async fn insert_file(&self, file: &NewProjectFile) -> Result<ProjectFile> {
        db::files::insert_file(&self.pool, file).await
    }

    async fn list_files(&self, project_id: Uuid) -> Result<Vec<ProjectFile>> {
        db::files::list_files(&self.pool, project_id).await
    }

    async fn insert_data_point(&self, point: &NewDataPoint) -> Result<DataPoint> {
        db::data_points::insert_data_point(&self.pool, point).await
    }

    async fn list_data_points(&self, project_id: Uuid) -> Result<Vec<DataPoint>> {
        db::data_points::list_data_points(&self.pool, project_id).await
    }
}
