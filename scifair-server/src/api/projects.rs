//! Project list, generation, detail, status and deletion

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use scifair_common::models::{Project, ProjectDetail};
use scifair_common::Direction;
use serde::Deserialize;
use uuid::Uuid;

use super::auth::CurrentUser;
use super::extract::{JsonBody, PathParams};
use crate::error::ApiResult;
use crate::workspace::{self, Advance, GenerateRequest};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub direction: Direction,
}

/// GET /api/projects
///
/// The caller's projects, newest first.
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = state.store.list_projects(current.user.id).await?;
    Ok(Json(projects))
}

/// POST /api/projects/generate
pub async fn generate_project(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    JsonBody(req): JsonBody<GenerateRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let project = workspace::generate_project(
        state.store.as_ref(),
        state.advisor.as_ref(),
        current.user.id,
        &req,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<Json<Project>> {
    let project = workspace::load_project(state.store.as_ref(), current.user.id, id).await?;
    Ok(Json(project))
}

/// GET /api/projects/:id/detail
pub async fn get_project_detail(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<Json<ProjectDetail>> {
    let detail = workspace::load_detail(state.store.as_ref(), current.user.id, id).await?;
    Ok(Json(detail))
}

/// POST /api/projects/:id/status
pub async fn advance_status(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
    JsonBody(req): JsonBody<StatusRequest>,
) -> ApiResult<Json<Advance>> {
    let advance =
        workspace::advance_status(state.store.as_ref(), current.user.id, id, req.direction)
            .await?;
    Ok(Json(advance))
}

/// DELETE /api/projects/:id
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<StatusCode> {
    workspace::delete_project(state.store.as_ref(), current.user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
