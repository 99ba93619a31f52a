//! Use-case services.
//!
//! Handlers for plain CRUD talk to the repositories directly; the two flows
//! with real logic live here.

pub mod auth_service;
pub mod discount_service;

pub use auth_service::{AuthService, LoginRequest, RefreshRequest, RegisterRequest};
pub use discount_service::DiscountService;
