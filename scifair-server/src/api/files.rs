//! Project file upload and listing

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    Extension, Json,
};
use scifair_common::models::ProjectFile;
use serde::Deserialize;
use uuid::Uuid;

use super::auth::CurrentUser;
use super::extract::{PathParams, QueryParams};
use crate::error::{ApiError, ApiResult};
use crate::workspace;
use crate::AppState;

const DEFAULT_FILE_TYPE: &str = "application/octet-stream";

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub file_name: String,
}

/// GET /api/projects/:id/files
///
/// Newest first.
pub async fn list_files(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<Json<Vec<ProjectFile>>> {
    let files = workspace::list_files(state.store.as_ref(), current.user.id, id).await?;
    Ok(Json(files))
}

/// POST /api/projects/:id/files?file_name=...
///
/// The raw request body is the file; `Content-Type` becomes the file type.
pub async fn upload_file(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
    QueryParams(query): QueryParams<UploadQuery>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<(StatusCode, Json<ProjectFile>)> {
    let bytes = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(format!(
                "Files are limited to {} bytes",
                state.max_upload_bytes
            ))
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    })?;

    let file_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(DEFAULT_FILE_TYPE);

    let file = workspace::upload_file(
        state.store.as_ref(),
        &state.blobs,
        current.user.id,
        id,
        &query.file_name,
        file_type,
        &bytes,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(file)))
}
