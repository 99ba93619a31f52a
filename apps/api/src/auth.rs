//! JWT authentication module.
//!
//! Handles token pair generation and validation, bearer header parsing and
//! password hashing.
//!
//! ```text
//! register / login / refresh
//!        │
//!        ▼
//! JwtManager::generate_pair ──► access  (ACCESS_SECRET,  24h)
//!                           └─► refresh (REFRESH_SECRET, 7d, stored on the user)
//! ```

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use playtowin_core::{Role, User};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::response::messages;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub user_id: String,

    /// Account email
    pub email: String,

    /// Account role
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// Access + refresh token pair returned by register, login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// JWT token manager.
pub struct JwtManager {
    access_secret: String,
    refresh_secret: String,
    access_lifetime_secs: i64,
    refresh_lifetime_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(
        access_secret: String,
        refresh_secret: String,
        access_lifetime_secs: i64,
        refresh_lifetime_secs: i64,
    ) -> Self {
        JwtManager {
            access_secret,
            refresh_secret,
            access_lifetime_secs,
            refresh_lifetime_secs,
        }
    }

    /// Create a JWT manager from the loaded configuration.
    pub fn from_config(config: &ApiConfig) -> Self {
        JwtManager::new(
            config.access_secret.clone(),
            config.refresh_secret.clone(),
            config.access_token_ttl_secs,
            config.refresh_token_ttl_secs,
        )
    }

    fn sign(&self, user: &User, secret: &str, lifetime_secs: i64) -> ApiResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(lifetime_secs);

        let claims = Claims {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| ApiError::internal(format!("Failed to generate token: {}", e)))
    }

    fn verify(token: &str, secret: &str) -> ApiResult<Claims> {
        let mut validation = Validation::default();
        validation.validate_nbf = true;

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|_| ApiError::unauthorized(messages::auth::INVALID_TOKEN))?;

        Ok(token_data.claims)
    }

    /// Generate an access token.
    pub fn generate_access_token(&self, user: &User) -> ApiResult<String> {
        self.sign(user, &self.access_secret, self.access_lifetime_secs)
    }

    /// Generate a refresh token.
    pub fn generate_refresh_token(&self, user: &User) -> ApiResult<String> {
        self.sign(user, &self.refresh_secret, self.refresh_lifetime_secs)
    }

    /// Generate both tokens for a user.
    pub fn generate_pair(&self, user: &User) -> ApiResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.generate_access_token(user)?,
            refresh_token: self.generate_refresh_token(user)?,
        })
    }

    /// Validate an access token (signed with the access secret).
    pub fn validate_access_token(&self, token: &str) -> ApiResult<Claims> {
        Self::verify(token, &self.access_secret)
    }

    /// Validate a refresh token (signed with the refresh secret).
    pub fn validate_refresh_token(&self, token: &str) -> ApiResult<Claims> {
        Self::verify(token, &self.refresh_secret)
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Check a password against a stored hash. Malformed hashes never verify.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
