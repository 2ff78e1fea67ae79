//! Sign-up, sign-in and sign-out

use axum::{extract::State, http::StatusCode, Extension, Json};
use scifair_common::db::accounts;
use scifair_common::models::User;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::auth::CurrentUser;
use super::extract::JsonBody;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Session token plus the signed-in account
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
}

/// POST /auth/signup
pub async fn sign_up(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SignUpRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user =
        accounts::create_user(&state.db, &req.email, req.full_name.trim(), &req.password).await?;
    info!(user_id = %user.id, "Account created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/signin
pub async fn sign_in(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SignInRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let Some(user) = accounts::verify_credentials(&state.db, &req.email, &req.password).await?
    else {
        warn!("Failed sign-in attempt");
        return Err(ApiError::Unauthorized("Invalid login credentials".to_string()));
    };

    let token = accounts::create_session(&state.db, user.id).await?;
    info!(user_id = %user.id, "Signed in");
    Ok(Json(SessionResponse { token, user }))
}

/// POST /auth/signout
pub async fn sign_out(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    accounts::delete_session(&state.db, &current.token).await?;
    info!(user_id = %current.user.id, "Signed out");
    Ok(StatusCode::NO_CONTENT)
}
