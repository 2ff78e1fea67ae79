//! Observation notes, experiment results and data points

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use scifair_common::models::{DataPoint, Project};
use serde::Deserialize;
use uuid::Uuid;

use super::auth::CurrentUser;
use super::extract::{JsonBody, PathParams};
use crate::error::ApiResult;
use crate::workspace;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub note: String,
}

/// `value` is the text the user typed; it is parsed here, not by the client
#[derive(Debug, Deserialize)]
pub struct ResultRequest {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct DataPointRequest {
    pub metric_name: String,
    pub value: String,
}

/// POST /api/projects/:id/notes
pub async fn add_note(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
    JsonBody(req): JsonBody<NoteRequest>,
) -> ApiResult<Json<Project>> {
    let project = workspace::add_note(state.store.as_ref(), current.user.id, id, &req.note).await?;
    Ok(Json(project))
}

/// DELETE /api/projects/:id/notes/:index
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams((id, index)): PathParams<(Uuid, usize)>,
) -> ApiResult<Json<Project>> {
    let project =
        workspace::delete_note(state.store.as_ref(), current.user.id, id, index).await?;
    Ok(Json(project))
}

/// POST /api/projects/:id/results
pub async fn add_result(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
    JsonBody(req): JsonBody<ResultRequest>,
) -> ApiResult<Json<Project>> {
    let project = workspace::add_result(
        state.store.as_ref(),
        current.user.id,
        id,
        &req.name,
        &req.value,
    )
    .await?;
    Ok(Json(project))
}

/// DELETE /api/projects/:id/results/:name
pub async fn delete_result(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams((id, name)): PathParams<(Uuid, String)>,
) -> ApiResult<Json<Project>> {
    let project =
        workspace::delete_result(state.store.as_ref(), current.user.id, id, &name).await?;
    Ok(Json(project))
}

/// GET /api/projects/:id/data-points
pub async fn list_data_points(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<Json<Vec<DataPoint>>> {
    let points = workspace::list_data_points(state.store.as_ref(), current.user.id, id).await?;
    Ok(Json(points))
}

/// POST /api/projects/:id/data-points
pub async fn add_data_point(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
    JsonBody(req): JsonBody<DataPointRequest>,
) -> ApiResult<(StatusCode, Json<DataPoint>)> {
    let point = workspace::add_data_point(
        state.store.as_ref(),
        current.user.id,
        id,
        &req.metric_name,
        &req.value,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(point)))
}
