//! Authentication middleware
//!
//! Protected routes need `Authorization: Bearer <session token>`. When a
//! client API key is configured, every API route (including sign-up and
//! sign-in) also needs a matching `apikey` header.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use scifair_common::db::accounts;
use scifair_common::models::User;
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Header carrying the static client API key
pub const API_KEY_HEADER: &str = "apikey";

/// Signed-in caller, inserted into request extensions by [`auth_middleware`]
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

fn check_client_key(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    let Some(expected) = state.client_api_key.as_deref() else {
        return Ok(());
    };

    let provided = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if provided != Some(expected) {
        warn!("Rejected request with missing or invalid client API key");
        return Err(ApiError::Unauthorized("Invalid API key".to_string()));
    }
    Ok(())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Client API key check for the public account routes
pub async fn client_key_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    check_client_key(&state, request.headers())?;
    Ok(next.run(request).await)
}

/// Session authentication for protected routes
///
/// Returns 401 when the client key or the session token is missing or unknown.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    check_client_key(&state, request.headers())?;

    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::Unauthorized("Missing session token".to_string()))?;

    let user = match accounts::find_session_user(&state.db, &token).await? {
        Some(user) => user,
        None => {
            warn!("Rejected request with unknown session token");
            return Err(ApiError::Unauthorized(
                "Session expired or invalid. Please sign in again".to_string(),
            ));
        }
    };

    request.extensions_mut().insert(CurrentUser { user, token });
    Ok(next.run(request).await)
}
