//! Store wrapper that records every write before delegating to SQLite

use async_trait::async_trait;
use scifair_common::models::{
    DataPoint, ExperimentResults, NewDataPoint, NewProject, NewProjectFile, Project, ProjectFile,
};
use scifair_common::{Error, ProjectStatus, ProjectStore, Result, SqliteStore};
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// One write issued through the store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreWrite {
    InsertProject(NewProject),
    UpdateStatus(Uuid, ProjectStatus),
    UpdateNotes(Uuid, Vec<String>),
    UpdateResults(Uuid, ExperimentResults),
    DeleteProject(Uuid),
    InsertFile(NewProjectFile),
    InsertDataPoint(NewDataPoint),
}

pub struct RecordingStore {
    inner: SqliteStore,
    writes: Mutex<Vec<StoreWrite>>,
    fail_writes: AtomicBool,
}

impl RecordingStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            inner: SqliteStore::new(pool),
            writes: Mutex::new(Vec::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// The unrecorded store, for arranging fixtures
    pub fn inner(&self) -> &SqliteStore {
        &self.inner
    }

    pub fn writes(&self) -> Vec<StoreWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.writes.lock().unwrap().clear();
    }

    /// Make every subsequent write fail (after being recorded)
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn record(&self, write: StoreWrite) -> Result<()> {
        self.writes.lock().unwrap().push(write);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Internal("simulated store failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for RecordingStore {
    async fn insert_project(&self, project: &NewProject) -> Result<Project> {
        self.record(StoreWrite::InsertProject(project.clone()))?;
        self.inner.insert_project(project).await
    }

    async fn list_projects(&self, user_id: Uuid) -> Result<Vec<Project>> {
        self.inner.list_projects(user_id).await
    }

    async fn get_project(&self, user_id: Uuid, id: Uuid) -> Result<Option<Project>> {
        self.inner.get_project(user_id, id).await
    }

    async fn update_status(&self, user_id: Uuid, id: Uuid, status: ProjectStatus) -> Result<()> {
        self.record(StoreWrite::UpdateStatus(id, status))?;
        self.inner.update_status(user_id, id, status).await
    }

    async fn update_notes(&self, user_id: Uuid, id: Uuid, notes: &[String]) -> Result<()> {
        self.record(StoreWrite::UpdateNotes(id, notes.to_vec()))?;
        self.inner.update_notes(user_id, id, notes).await
    }

    async fn update_results(
        &self,
        user_id: Uuid,
        id: Uuid,
        results: &ExperimentResults,
    ) -> Result<()> {
        self.record(StoreWrite::UpdateResults(id, results.clone()))?;
        self.inner.update_results(user_id, id, results).await
    }

    async fn delete_project(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        self.record(StoreWrite::DeleteProject(id))?;
        self.inner.delete_project(user_id, id).await
    }

    async fn insert_file(&self, file: &NewProjectFile) -> Result<ProjectFile> {
        self.record(StoreWrite::InsertFile(file.clone()))?;
        self.inner.insert_file(file).await
    }

    async fn list_files(&self, project_id: Uuid) -> Result<Vec<ProjectFile>> {
        self.inner.list_files(project_id).await
    }

    async fn insert_data_point(&self, point: &NewDataPoint) -> Result<DataPoint> {
        self.record(StoreWrite::InsertDataPoint(point.clone()))?;
        self.inner.insert_data_point(point).await
    }

    async fn list_data_points(&self, project_id: Uuid) -> Result<Vec<DataPoint>> {
        self.inner.list_data_points(project_id).await
    }
}
