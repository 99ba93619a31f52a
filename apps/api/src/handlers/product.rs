//! Product handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use playtowin_core::validation::{
    validate_name, validate_non_negative, validate_positive_cents, validate_required,
};
use playtowin_core::Product;

use super::JsonBody;
use crate::error::ApiResult;
use crate::response::{messages::product as msg, ApiResponse};
use crate::AppState;

/// Body of product create / update. Prices are in cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub content: String,
    pub image: String,
    pub price_cents: i64,
    #[serde(default)]
    pub sold: i64,
    #[serde(default)]
    pub stock: i64,
}

impl ProductRequest {
    fn validate(&self) -> ApiResult<()> {
        validate_name("name", &self.name)?;
        validate_required("description", &self.description)?;
        validate_required("content", &self.content)?;
        validate_required("image", &self.image)?;
        validate_positive_cents("price_cents", self.price_cents)?;
        validate_non_negative("sold", self.sold)?;
        validate_non_negative("stock", self.stock)?;
        Ok(())
    }

    fn apply_to(self, product: &mut Product) {
        product.name = self.name.trim().to_string();
        product.description = self.description;
        product.content = self.content;
        product.image = self.image;
        product.price_cents = self.price_cents;
        product.sold = self.sold;
        product.stock = self.stock;
    }
}

pub async fn list(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Product>>> {
    let products = state.db.products().find_all().await?;
    Ok(ApiResponse::ok(msg::LISTED, products))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Product>> {
    let product = state.db.products().find_by_id(&id).await?;
    Ok(ApiResponse::ok(msg::RETRIEVED, product))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ProductRequest>,
) -> ApiResult<ApiResponse<Product>> {
    req.validate()?;

    let now = Utc::now();
    let mut product = Product {
        id: Uuid::new_v4().to_string(),
        name: String::new(),
        description: String::new(),
        content: String::new(),
        price_cents: 0,
        image: String::new(),
        sold: 0,
        stock: 0,
        created_at: now,
        updated_at: now,
    };
    req.apply_to(&mut product);

    let product = state.db.products().create(&product).await?;
    info!(id = %product.id, price_cents = product.price_cents, "Product created");
    Ok(ApiResponse::created(msg::CREATED, product))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ProductRequest>,
) -> ApiResult<ApiResponse<Product>> {
    req.validate()?;

    let repo = state.db.products();
    let mut product = repo.find_by_id(&id).await?;
    req.apply_to(&mut product);

    let product = repo.update(&product).await?;
    Ok(ApiResponse::ok(msg::UPDATED, product))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.db.products().delete(&id).await?;
    info!(id = %id, "Product deleted");
    Ok(ApiResponse::empty(StatusCode::OK, msg::DELETED))
}
