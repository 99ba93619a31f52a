//! Authentication handlers.

use axum::extract::State;
use axum::Extension;

use playtowin_core::UserProfile;

use super::JsonBody;
use crate::auth::{Claims, TokenPair};
use crate::error::ApiResult;
use crate::response::{messages::auth as msg, ApiResponse};
use crate::services::{AuthService, LoginRequest, RefreshRequest, RegisterRequest};
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ApiResult<ApiResponse<TokenPair>> {
    let pair = AuthService::new(state).register(req).await?;
    Ok(ApiResponse::created(msg::REGISTERED, pair))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<ApiResponse<TokenPair>> {
    let pair = AuthService::new(state).login(req).await?;
    Ok(ApiResponse::ok(msg::LOGGED_IN, pair))
}

pub async fn refresh(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RefreshRequest>,
) -> ApiResult<ApiResponse<TokenPair>> {
    let pair = AuthService::new(state).refresh(req).await?;
    Ok(ApiResponse::ok(msg::REFRESHED, pair))
}

pub async fn profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<ApiResponse<UserProfile>> {
    let profile = AuthService::new(state).profile(&claims.user_id).await?;
    Ok(ApiResponse::ok(msg::PROFILE, profile))
}
