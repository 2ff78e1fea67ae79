//! Guidance, presentation and export views of a project

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Extension, Json,
};
use scifair_common::catalog::{self, Category, GuidePhase, TutorialStep};
use scifair_common::export::export_file_name;
use scifair_common::presentation::{self, Slide};
use serde::Serialize;
use uuid::Uuid;

use super::auth::CurrentUser;
use super::extract::PathParams;
use crate::error::{ApiError, ApiResult};
use crate::workspace;
use crate::AppState;

/// Everything the guide panel shows for one project
#[derive(Debug, Serialize)]
pub struct GuideResponse {
    pub category: Category,
    pub phases: [GuidePhase; 3],
    pub tutorial: Vec<TutorialStep>,
    pub safety_tips: &'static [&'static str],
    pub fun_facts: &'static [&'static str],
}

/// GET /api/projects/:id/guide
pub async fn get_guide(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<Json<GuideResponse>> {
    let project = workspace::load_project(state.store.as_ref(), current.user.id, id).await?;
    let category = Category::classify(&project.category);

    Ok(Json(GuideResponse {
        category,
        phases: catalog::project_guide(),
        tutorial: catalog::tutorial(&project.category),
        safety_tips: category.safety_tips(),
        fun_facts: category.fun_facts(),
    }))
}

/// GET /api/projects/:id/slides
pub async fn get_slides(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<Json<Vec<Slide>>> {
    let project = workspace::load_project(state.store.as_ref(), current.user.id, id).await?;
    Ok(Json(presentation::slides(&project)))
}

/// GET /api/projects/:id/presentation
///
/// Printable landscape HTML, one page per slide.
pub async fn get_presentation(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<Html<String>> {
    let project = workspace::load_project(state.store.as_ref(), current.user.id, id).await?;
    let slides = presentation::slides(&project);
    Ok(Html(presentation::render_printable_html(&project, &slides)))
}

/// GET /api/projects/:id/export
///
/// JSON download of the project, its files and data points.
pub async fn export_project(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let export = workspace::export_project(state.store.as_ref(), current.user.id, id).await?;
    let body = serde_json::to_string_pretty(&export)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize export: {}", e)))?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(&export.project)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
