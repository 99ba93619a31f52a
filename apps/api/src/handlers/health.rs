//! Liveness probe.

use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::response::ApiResponse;
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub service: String,
    pub version: String,
    pub database: bool,
}

/// 200 when the database answers, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> ApiResponse<HealthStatus> {
    let database = state.db.health_check().await;
    let status = HealthStatus {
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    };

    if database {
        ApiResponse::ok("Service is healthy", status)
    } else {
        ApiResponse::new(StatusCode::SERVICE_UNAVAILABLE, "Database unavailable", Some(status))
    }
}
