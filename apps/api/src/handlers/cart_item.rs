//! Cart item handlers.
//!
//! Category and prices are taken from the request as given; the discount
//! engine later trusts them. When `total_price_cents` is omitted it is
//! `unit_price_cents * quantity`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Extension;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use playtowin_core::validation::{
    validate_name, validate_positive_cents, validate_quantity, validate_uuid,
};
use playtowin_core::{CartItem, Money, ValidationError};

use super::cart::owned_cart;
use super::JsonBody;
use crate::auth::Claims;
use crate::error::ApiResult;
use crate::response::{messages::cart_item as msg, ApiResponse};
use crate::AppState;

/// Line fields shared by create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRequest {
    pub product_id: String,
    pub quantity: i64,
    pub category: String,
    pub unit_price_cents: i64,
    pub total_price_cents: Option<i64>,
}

impl LineRequest {
    fn validate(&self) -> ApiResult<()> {
        validate_uuid("product_id", &self.product_id)?;
        validate_quantity(self.quantity)?;
        validate_name("category", &self.category)?;
        validate_positive_cents("unit_price_cents", self.unit_price_cents)?;
        if let Some(total) = self.total_price_cents {
            validate_positive_cents("total_price_cents", total)?;
        }
        self.total_cents()?;
        Ok(())
    }

    fn total_cents(&self) -> ApiResult<i64> {
        if let Some(total) = self.total_price_cents {
            return Ok(total);
        }
        Money::from_cents(self.unit_price_cents)
            .checked_mul(self.quantity)
            .map(|total| total.cents())
            .ok_or_else(|| {
                ValidationError::OutOfRange {
                    field: "total_price_cents".to_string(),
                    min: 1,
                    max: i64::MAX,
                }
                .into()
            })
    }

    fn apply_to(self, item: &mut CartItem) -> ApiResult<()> {
        item.total_price_cents = self.total_cents()?;
        item.product_id = self.product_id;
        item.quantity = self.quantity;
        item.category = self.category.trim().to_string();
        item.unit_price_cents = self.unit_price_cents;
        Ok(())
    }
}

/// Body of `POST /cart-items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCartItemRequest {
    pub cart_id: String,
    #[serde(flatten)]
    pub line: LineRequest,
}

/// Lists every line of every cart (admin).
pub async fn list(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<CartItem>>> {
    let items = state.db.cart_items().find_all().await?;
    Ok(ApiResponse::ok(msg::LISTED, items))
}

/// Lists the lines of one cart.
pub async fn list_by_cart(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(cart_id): Path<String>,
) -> ApiResult<ApiResponse<Vec<CartItem>>> {
    owned_cart(&state, &claims, &cart_id).await?;
    let items = state.db.cart_items().find_by_cart_id(&cart_id).await?;
    Ok(ApiResponse::ok(msg::LISTED, items))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    JsonBody(req): JsonBody<CreateCartItemRequest>,
) -> ApiResult<ApiResponse<CartItem>> {
    validate_uuid("cart_id", &req.cart_id)?;
    req.line.validate()?;
    owned_cart(&state, &claims, &req.cart_id).await?;

    let now = Utc::now();
    let mut item = CartItem {
        id: Uuid::new_v4().to_string(),
        cart_id: req.cart_id,
        product_id: String::new(),
        quantity: 0,
        category: String::new(),
        unit_price_cents: 0,
        total_price_cents: 0,
        created_at: now,
        updated_at: now,
        product_name: None,
        product_description: None,
        product_image: None,
        product_price_cents: None,
    };
    req.line.apply_to(&mut item)?;

    let item = state.db.cart_items().create(&item).await?;
    info!(
        id = %item.id,
        cart_id = %item.cart_id,
        quantity = item.quantity,
        total_price_cents = item.total_price_cents,
        "Cart item created"
    );
    Ok(ApiResponse::created(msg::CREATED, item))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<LineRequest>,
) -> ApiResult<ApiResponse<CartItem>> {
    req.validate()?;

    let repo = state.db.cart_items();
    let mut item = repo.find_by_id(&id).await?;
    owned_cart(&state, &claims, &item.cart_id).await?;
    req.apply_to(&mut item)?;

    let item = repo.update(&item).await?;
    Ok(ApiResponse::ok(msg::UPDATED, item))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let repo = state.db.cart_items();
    let item = repo.find_by_id(&id).await?;
    owned_cart(&state, &claims, &item.cart_id).await?;

    repo.delete(&id).await?;
    info!(id = %id, cart_id = %item.cart_id, "Cart item deleted");
    Ok(ApiResponse::empty(StatusCode::OK, msg::DELETED))
}
