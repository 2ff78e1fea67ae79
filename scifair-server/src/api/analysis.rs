//! AI analysis endpoints
//!
//! Advisor text is returned verbatim; failures map to 502.

use axum::{
    extract::State,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auth::CurrentUser;
use super::extract::{JsonBody, PathParams};
use crate::advisor::DataAnalysis;
use crate::error::ApiResult;
use crate::workspace;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    pub question: String,
}

/// Free-text advisor answer
#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

/// POST /api/projects/:id/analysis/data
pub async fn analyze_data(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<Json<DataAnalysis>> {
    let analysis = workspace::analyze_data(
        state.store.as_ref(),
        state.advisor.as_ref(),
        current.user.id,
        id,
    )
    .await?;
    Ok(Json(analysis))
}

/// POST /api/projects/:id/analysis/plan
pub async fn plan_experiment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<Json<TextResponse>> {
    let text = workspace::plan_experiment(
        state.store.as_ref(),
        state.advisor.as_ref(),
        current.user.id,
        id,
    )
    .await?;
    Ok(Json(TextResponse { text }))
}

/// POST /api/projects/:id/analysis/project
pub async fn analyze_project(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<Json<TextResponse>> {
    let text = workspace::analyze_project(
        state.store.as_ref(),
        state.advisor.as_ref(),
        current.user.id,
        id,
    )
    .await?;
    Ok(Json(TextResponse { text }))
}

/// POST /api/projects/:id/analysis/research
pub async fn research_question(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
    JsonBody(req): JsonBody<ResearchRequest>,
) -> ApiResult<Json<TextResponse>> {
    let text = workspace::research_question(
        state.store.as_ref(),
        state.advisor.as_ref(),
        current.user.id,
        id,
        &req.question,
    )
    .await?;
    Ok(Json(TextResponse { text }))
}
