//! Local blob storage for uploaded project files
//!
//! Blobs live under `<root>/blobs/<project_id>/<uuid>.<ext>` and are served
//! read-only at `/blobs/...`. Keys are generated, never taken from the
//! client, so an upload cannot escape the blob directory.

use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Public URL prefix under which blobs are served
pub const BLOB_ROUTE: &str = "/blobs";

#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl BlobStore {
    pub fn new(root: PathBuf, public_base_url: impl Into<String>) -> Self {
        Self {
            root,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` and return the durable URL of the stored blob
    pub async fn put(
        &self,
        project_id: Uuid,
        file_name: &str,
        bytes: &[u8],
    ) -> std::io::Result<String> {
        let key = blob_key(project_id, file_name);
        let path = self.root.join(&key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(key = %key, bytes = bytes.len(), "Blob stored");
        Ok(format!("{}{}/{}", self.public_base_url, BLOB_ROUTE, key))
    }
}

/// `<project_id>/<uuid>[.<ext>]`, extension taken from the original name
fn blob_key(project_id: Uuid, file_name: &str) -> String {
    let id = Uuid::new_v4();
    match file_extension(file_name) {
        Some(ext) => format!("{}/{}.{}", project_id, id, ext),
        None => format!("{}/{}", project_id, id),
    }
}

fn file_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
