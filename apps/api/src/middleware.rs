//! Authentication and role guards.
//!
//! ```text
//! request ──► require_auth ──► require_admin ──► handler
//!               │                  │
//!               │ Bearer access    │ Claims.role == admin
//!               │ token → Claims   │
//!               ▼                  ▼
//!              401                403 (401 if no Claims)
//! ```
//!
//! `require_auth` stores the decoded [`Claims`] in the request extensions;
//! handlers read them with `Extension<Claims>`.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use playtowin_core::Role;

use crate::auth::{extract_bearer_token, Claims};
use crate::error::ApiError;
use crate::response::messages;
use crate::AppState;

/// Requires a valid access token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized(messages::auth::MISSING_HEADER))?;

    let token = header
        .to_str()
        .ok()
        .and_then(extract_bearer_token)
        .ok_or_else(|| ApiError::unauthorized(messages::auth::INVALID_HEADER))?;

    let claims = state.jwt.validate_access_token(token)?;
    debug!(user_id = %claims.user_id, role = claims.role.as_str(), "Authenticated request");

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Requires the `admin` role. Must run after [`require_auth`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| ApiError::unauthorized(messages::auth::NOT_AUTHENTICATED))?;

    if claims.role != Role::Admin {
        return Err(ApiError::forbidden(messages::auth::FORBIDDEN));
    }

    Ok(next.run(req).await)
}
