//! Discount calculation over a stored cart.
//!
//! ```text
//! cart_id ──► cart_items.find_by_cart_id ──► CartItem::to_line_item
//!                                                  │
//!                    DiscountStrategy::apply ◄─────┘
//!                             │
//!                             ▼
//!                        final price
//! ```

use tracing::{debug, info};

use playtowin_core::{DiscountStrategy, LineItem, Money};

use crate::error::ApiResult;
use crate::AppState;

/// Runs one engine strategy against the items of a cart.
pub struct DiscountService {
    state: AppState,
}

impl DiscountService {
    pub fn new(state: AppState) -> Self {
        DiscountService { state }
    }

    /// Loads the cart's line items in insertion order.
    ///
    /// An unknown cart simply has no items.
    pub async fn line_items(&self, cart_id: &str) -> ApiResult<Vec<LineItem>> {
        let items = self.state.db.cart_items().find_by_cart_id(cart_id).await?;
        Ok(items.iter().map(|item| item.to_line_item()).collect())
    }

    /// Computes the discounted total of a cart.
    pub async fn calculate(&self, cart_id: &str, strategy: &DiscountStrategy) -> ApiResult<Money> {
        let items = self.line_items(cart_id).await?;
        debug!(cart_id = %cart_id, items = items.len(), kind = ?strategy.kind(), "Applying discount");

        let total = strategy.apply(&items)?;

        info!(
            cart_id = %cart_id,
            kind = ?strategy.kind(),
            final_cents = total.cents(),
            "Discount calculated"
        );
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use axum::http::StatusCode;
    use playtowin_core::types::Percentage;

    #[tokio::test]
    async fn test_percentage_over_stored_cart() {
        let state = test_support::state().await;
        let cart_id = test_support::cart_with_items(&state, &[("shoes", 2, 30_000), ("hats", 1, 40_000)]).await;
        let service = DiscountService::new(state);

        let total = service
            .calculate(
                &cart_id,
                &DiscountStrategy::Percentage {
                    percentage: Percentage::from_percent(10.0),
                },
            )
            .await
            .unwrap();
        assert_eq!(total, Money::from_major(900));
    }

    #[tokio::test]
    async fn test_category_over_stored_cart() {
        let state = test_support::state().await;
        let cart_id = test_support::cart_with_items(&state, &[("shoes", 2, 30_000), ("hats", 1, 40_000)]).await;
        let service = DiscountService::new(state);

        let total = service
            .calculate(
                &cart_id,
                &DiscountStrategy::Category {
                    category: "shoes".to_string(),
                    percentage: Percentage::from_percent(50.0),
                },
            )
            .await
            .unwrap();
        assert_eq!(total, Money::from_major(700));
    }

    #[tokio::test]
    async fn test_unknown_cart_is_empty() {
        let state = test_support::state().await;
        let service = DiscountService::new(state);

        assert!(service.line_items("missing").await.unwrap().is_empty());

        let err = service
            .calculate("missing", &DiscountStrategy::Points { points: 10 })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "cart is empty");
    }
}
