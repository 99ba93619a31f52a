//! Cart handlers.
//!
//! Carts belong to the user in the access token. A cart is visible to its
//! owner and to admins; anyone else gets 403.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Extension;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use playtowin_core::validation::validate_non_negative;
use playtowin_core::{Cart, Role};

use super::JsonBody;
use crate::auth::Claims;
use crate::error::{ApiError, ApiResult};
use crate::response::{messages, messages::cart as msg, ApiResponse};
use crate::AppState;

/// Body of cart create / update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartRequest {
    #[serde(default)]
    pub total_amount_cents: i64,
}

/// Loads a cart and checks the caller may touch it.
pub(crate) async fn owned_cart(state: &AppState, claims: &Claims, cart_id: &str) -> ApiResult<Cart> {
    let cart = state.db.carts().find_by_id(cart_id).await?;

    if cart.user_id != claims.user_id && claims.role != Role::Admin {
        warn!(cart_id = %cart_id, user_id = %claims.user_id, "Cart access denied");
        return Err(ApiError::forbidden(messages::auth::FORBIDDEN));
    }

    Ok(cart)
}

/// Lists the caller's own carts.
pub async fn list_own(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<ApiResponse<Vec<Cart>>> {
    let carts = state.db.carts().find_by_user_id(&claims.user_id).await?;
    Ok(ApiResponse::ok(msg::LISTED, carts))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Cart>> {
    let cart = owned_cart(&state, &claims, &id).await?;
    Ok(ApiResponse::ok(msg::RETRIEVED, cart))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    JsonBody(req): JsonBody<CartRequest>,
) -> ApiResult<ApiResponse<Cart>> {
    validate_non_negative("total_amount_cents", req.total_amount_cents)?;

    let now = Utc::now();
    let cart = Cart {
        id: Uuid::new_v4().to_string(),
        user_id: claims.user_id.clone(),
        total_amount_cents: req.total_amount_cents,
        created_at: now,
        updated_at: now,
    };

    let cart = state.db.carts().create(&cart).await?;
    info!(id = %cart.id, user_id = %cart.user_id, "Cart created");
    Ok(ApiResponse::created(msg::CREATED, cart))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<CartRequest>,
) -> ApiResult<ApiResponse<Cart>> {
    validate_non_negative("total_amount_cents", req.total_amount_cents)?;

    let mut cart = owned_cart(&state, &claims, &id).await?;
    cart.total_amount_cents = req.total_amount_cents;

    let cart = state.db.carts().update(&cart).await?;
    Ok(ApiResponse::ok(msg::UPDATED, cart))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    owned_cart(&state, &claims, &id).await?;
    state.db.carts().delete(&id).await?;
    info!(id = %id, "Cart deleted");
    Ok(ApiResponse::empty(StatusCode::OK, msg::DELETED))
}
