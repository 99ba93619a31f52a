//! Error types for the API.
//!
//! Every failure on a request path becomes an [`ApiError`], which renders
//! itself as the standard envelope with `data: null`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use playtowin_core::{CoreError, DiscountError, ValidationError};
use playtowin_db::DbError;

use crate::response::{messages, ApiResponse};

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

/// Convenience type alias for handler results.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    /// The malformed-body error shared by every JSON route.
    pub fn invalid_payload() -> Self {
        ApiError::BadRequest(messages::INVALID_PAYLOAD.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiResponse::empty(self.status_code(), self.to_string()).into_response()
    }
}

/// Database errors: caller mistakes keep their meaning, everything else is
/// logged and reported as a generic 500.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, .. } => ApiError::NotFound(format!("{} not found", entity)),
            DbError::UniqueViolation { field, .. } => {
                ApiError::Conflict(format!("{} already exists", field))
            }
            DbError::ForeignKeyViolation { .. } => {
                ApiError::BadRequest("Referenced record does not exist".to_string())
            }
            other => {
                error!(error = %other, "Database operation failed");
                ApiError::Internal(messages::INTERNAL_ERROR.to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Engine failures are reported verbatim with a 500, like any other
/// failure on the discount routes.
impl From<DiscountError> for ApiError {
    fn from(err: DiscountError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::Discount(e) => e.into(),
        }
    }
}
