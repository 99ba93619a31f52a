//! Category handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use playtowin_core::validation::{validate_name, validate_required};
use playtowin_core::Category;

use super::JsonBody;
use crate::error::ApiResult;
use crate::response::{messages::category as msg, ApiResponse};
use crate::AppState;

/// Body of category create / update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub description: String,
}

impl CategoryRequest {
    fn validate(&self) -> ApiResult<()> {
        validate_name("name", &self.name)?;
        validate_required("description", &self.description)?;
        Ok(())
    }
}

pub async fn list(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Category>>> {
    let categories = state.db.categories().find_all().await?;
    Ok(ApiResponse::ok(msg::LISTED, categories))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Category>> {
    let category = state.db.categories().find_by_id(&id).await?;
    Ok(ApiResponse::ok(msg::RETRIEVED, category))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CategoryRequest>,
) -> ApiResult<ApiResponse<Category>> {
    req.validate()?;

    let now = Utc::now();
    let category = Category {
        id: Uuid::new_v4().to_string(),
        name: req.name.trim().to_string(),
        description: req.description,
        created_at: now,
        updated_at: now,
    };

    let category = state.db.categories().create(&category).await?;
    info!(id = %category.id, name = %category.name, "Category created");
    Ok(ApiResponse::created(msg::CREATED, category))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<CategoryRequest>,
) -> ApiResult<ApiResponse<Category>> {
    req.validate()?;

    let repo = state.db.categories();
    let mut category = repo.find_by_id(&id).await?;
    category.name = req.name.trim().to_string();
    category.description = req.description;

    let category = repo.update(&category).await?;
    Ok(ApiResponse::ok(msg::UPDATED, category))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.db.categories().delete(&id).await?;
    info!(id = %id, "Category deleted");
    Ok(ApiResponse::empty(StatusCode::OK, msg::DELETED))
}
