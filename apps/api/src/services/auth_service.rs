//! Account registration, login and token rotation.
//!
//! Every successful flow ends the same way: a fresh token pair is issued and
//! its refresh token is stored on the user, replacing the previous one. A
//! refresh token is therefore single-use.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use playtowin_core::validation::{validate_email, validate_name, validate_password};
use playtowin_core::{Role, User, UserProfile};
use playtowin_db::DbError;

use crate::auth::{hash_password, verify_password, TokenPair};
use crate::error::{ApiError, ApiResult};
use crate::response::messages;
use crate::AppState;

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Authentication service.
pub struct AuthService {
    state: AppState,
}

impl AuthService {
    /// Create a new authentication service.
    pub fn new(state: AppState) -> Self {
        AuthService { state }
    }

    /// Create a `user` account and sign it in.
    pub async fn register(&self, req: RegisterRequest) -> ApiResult<TokenPair> {
        validate_name("name", &req.name)?;
        validate_email(&req.email)?;
        validate_password(&req.password)?;

        let email = req.email.trim();
        let users = self.state.db.users();

        if users.find_by_email(email).await?.is_some() {
            return Err(ApiError::Conflict(messages::auth::USER_EXISTS.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: req.name.trim().to_string(),
            email: email.to_string(),
            password_hash: hash_password(&req.password)?,
            role: Role::User,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };

        let user = users.create(&user).await.map_err(|e| match e {
            // Lost a race with a concurrent registration
            DbError::UniqueViolation { .. } => {
                ApiError::Conflict(messages::auth::USER_EXISTS.to_string())
            }
            other => {
                error!(error = %other, "Failed to persist new user");
                ApiError::internal(messages::auth::REGISTER_FAILED)
            }
        })?;

        info!(user_id = %user.id, "User registered");
        self.issue_tokens(&user).await
    }

    /// Exchange email + password for a token pair.
    ///
    /// Unknown email, wrong password and storage failures all look the same
    /// to the caller.
    pub async fn login(&self, req: LoginRequest) -> ApiResult<TokenPair> {
        let invalid = || ApiError::unauthorized(messages::auth::INVALID_CREDENTIALS);

        let user = match self.state.db.users().find_by_email(req.email.trim()).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(invalid()),
            Err(e) => {
                error!(error = %e, "User lookup failed during login");
                return Err(invalid());
            }
        };

        if !verify_password(&req.password, &user.password_hash) {
            warn!(user_id = %user.id, "Login with wrong password");
            return Err(invalid());
        }

        info!(user_id = %user.id, "User logged in");
        self.issue_tokens(&user).await.map_err(|e| {
            error!(error = %e, "Failed to issue tokens on login");
            invalid()
        })
    }

    /// Rotate a token pair.
    ///
    /// The refresh token must verify against the refresh secret and match
    /// the one currently stored for its user.
    pub async fn refresh(&self, req: RefreshRequest) -> ApiResult<TokenPair> {
        let invalid = || ApiError::unauthorized(messages::auth::INVALID_TOKEN);

        let claims = self.state.jwt.validate_refresh_token(&req.refresh_token)?;

        let user = self
            .state
            .db
            .users()
            .find_by_id(&claims.user_id)
            .await
            .map_err(|_| invalid())?;

        if user.refresh_token.as_deref() != Some(req.refresh_token.as_str()) {
            warn!(user_id = %user.id, "Refresh with a superseded token");
            return Err(invalid());
        }

        info!(user_id = %user.id, "Token refreshed");
        self.issue_tokens(&user).await.map_err(|_| invalid())
    }

    /// Public profile of the signed-in user.
    pub async fn profile(&self, user_id: &str) -> ApiResult<UserProfile> {
        let user = self.state.db.users().find_by_id(user_id).await?;
        Ok(UserProfile::from(&user))
    }

    async fn issue_tokens(&self, user: &User) -> ApiResult<TokenPair> {
        let pair = self.state.jwt.generate_pair(user)?;
        self.state
            .db
            .users()
            .update_refresh_token(&user.id, &pair.refresh_token)
            .await?;
        Ok(pair)
    }
}
