//! # Play-to-Win API
//!
//! axum REST server for the promotions backend.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          API Request Flow                               │
//! │                                                                         │
//! │  HTTP ──► tower-http layers (request id, trace, panic, CORS)            │
//! │             │                                                           │
//! │             ▼                                                           │
//! │           /api/v1 router ──► require_auth ──► require_admin             │
//! │             │                                                           │
//! │             ▼                                                           │
//! │           handlers ──► services (auth, discount) ──► playtowin-db       │
//! │             │                        │                                  │
//! │             │                        └──► playtowin-core engine         │
//! │             ▼                                                           │
//! │           {status, message, code, data}                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use playtowin_db::Database;

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod services;

pub use auth::{Claims, JwtManager, TokenPair};
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use response::ApiResponse;
pub use router::build_router;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtManager>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            db,
            jwt: Arc::new(JwtManager::from_config(&config)),
            config: Arc::new(config),
        }
    }
}
