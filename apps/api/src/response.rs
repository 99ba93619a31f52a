//! # Response Envelope
//!
//! Every response body, success or failure, has the same shape:
//!
//! ```text
//! {
//!   "status":  true,                 // 200 <= code < 300
//!   "message": "Category created successfully",
//!   "code":    201,
//!   "data":    { ... } | null
//! }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// The JSON envelope wrapping every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: bool,
    pub message: String,
    pub code: u16,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Builds an envelope for `code`; `status` is derived from it.
    pub fn new(code: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        ApiResponse {
            status: code.is_success(),
            message: message.into(),
            code: code.as_u16(),
            data,
        }
    }

    /// 200 with data.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, message, Some(data))
    }

    /// 201 with data.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, message, Some(data))
    }
}

impl ApiResponse<()> {
    /// Envelope without payload (`data: null`).
    pub fn empty(code: StatusCode, message: impl Into<String>) -> Self {
        ApiResponse::new(code, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let code = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (code, Json(self)).into_response()
    }
}

// =============================================================================
// Messages
// =============================================================================

/// Envelope messages, one module per resource.
pub mod messages {
    pub const INVALID_PAYLOAD: &str = "Invalid request payload";
    pub const INTERNAL_ERROR: &str = "Internal server error";

    pub mod category {
        pub const CREATED: &str = "Category created successfully";
        pub const UPDATED: &str = "Category updated successfully";
        pub const DELETED: &str = "Category deleted successfully";
        pub const RETRIEVED: &str = "Category retrieved successfully";
        pub const LISTED: &str = "Categories retrieved successfully";
    }

    pub mod product {
        pub const CREATED: &str = "Product created successfully";
        pub const UPDATED: &str = "Product updated successfully";
        pub const DELETED: &str = "Product deleted successfully";
        pub const RETRIEVED: &str = "Product retrieved successfully";
        pub const LISTED: &str = "Products retrieved successfully";
    }

    pub mod campaign {
        pub const CREATED: &str = "Campaign created successfully";
        pub const UPDATED: &str = "Campaign updated successfully";
        pub const DELETED: &str = "Campaign deleted successfully";
        pub const RETRIEVED: &str = "Campaign retrieved successfully";
        pub const LISTED: &str = "Campaigns retrieved successfully";
    }

    pub mod discount_rule {
        pub const CREATED: &str = "Discount Rule has been created";
        pub const UPDATED: &str = "Discount Rule has been updated";
        pub const DELETED: &str = "Discount Rule has been deleted";
        pub const RETRIEVED: &str = "Discount Rule has been retrieved";
        pub const LISTED: &str = "Discount Rules have been retrieved";
    }

    pub mod cart {
        pub const CREATED: &str = "Cart has been created";
        pub const UPDATED: &str = "Cart has been updated";
        pub const DELETED: &str = "Cart has been deleted";
        pub const RETRIEVED: &str = "Cart has been retrieved";
        pub const LISTED: &str = "Carts have been retrieved";
    }

    pub mod cart_item {
        pub const CREATED: &str = "Cart Item has been created";
        pub const UPDATED: &str = "Cart Item has been updated";
        pub const DELETED: &str = "Cart Item has been deleted";
        pub const RETRIEVED: &str = "Cart Item has been retrieved";
        pub const LISTED: &str = "Cart Items have been retrieved";
    }

    pub mod auth {
        pub const REGISTERED: &str = "User registered successfully";
        pub const LOGGED_IN: &str = "User logged in successfully";
        pub const REFRESHED: &str = "Token refreshed successfully";
        pub const PROFILE: &str = "User retrieved successfully";
        pub const USER_EXISTS: &str = "User already exists";
        pub const REGISTER_FAILED: &str = "Failed to register user";
        pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
        pub const MISSING_HEADER: &str = "Missing authorization header";
        pub const INVALID_HEADER: &str = "Invalid authorization header";
        pub const INVALID_TOKEN: &str = "Invalid token";
        pub const NOT_AUTHENTICATED: &str = "User not authenticated";
        pub const FORBIDDEN: &str = "Insufficient permissions";
    }

    pub const DISCOUNT_CALCULATED: &str = "Discount calculated successfully";
}
