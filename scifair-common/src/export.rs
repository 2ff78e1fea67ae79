//! JSON export of a project for download

use crate::models::{DataPoint, Project, ProjectFile};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Bumped whenever the export layout changes
pub const EXPORT_FORMAT_VERSION: u32 = 1;

/// Downloadable snapshot of a project and everything attached to it
#[derive(Debug, Clone, Serialize)]
pub struct ProjectExport {
    pub format_version: u32,
    pub exported_at: DateTime<Utc>,
    pub project: Project,
    pub files: Vec<ProjectFile>,
    pub data_points: Vec<DataPoint>,
}

impl ProjectExport {
    pub fn new(project: Project, files: Vec<ProjectFile>, data_points: Vec<DataPoint>) -> Self {
        Self {
            format_version: EXPORT_FORMAT_VERSION,
            exported_at: Utc::now(),
            project,
            files,
            data_points,
        }
    }
}

/// Download file name: lowercase title slug + `.json`
pub fn export_file_name(project: &Project) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;

    for c in project.title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        slug.push_str("project");
    }
    format!("{}.json", slug)
}
