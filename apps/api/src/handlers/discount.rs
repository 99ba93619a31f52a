//! Discount calculation handlers.
//!
//! ```text
//! GET /discounts/fixed-amount/{cart_id}?amount=100
//! GET /discounts/percentage/{cart_id}?percentage=10
//! GET /discounts/category/{cart_id}?category=shoes&percentage=15
//! GET /discounts/points/{cart_id}?points=68
//! GET /discounts/special/{cart_id}?threshold=300&discount=40
//! ```
//!
//! Query numbers are decimal major units (or percent). A missing or
//! malformed number reads as zero, so `?amount=abc` is a zero discount
//! rather than a 400. `inf` and `Infinity` parse as unbounded values and
//! saturate. Rounding to cents or basis points keeps the sign and the
//! out-of-range side of the raw value, so `amount=-0.004` is still rejected.
//! Every failure, lookup or engine, is a 500 carrying the error message.

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use playtowin_core::{DiscountStrategy, Money, Percentage};

use crate::error::ApiResult;
use crate::response::{messages, ApiResponse};
use crate::services::DiscountService;
use crate::AppState;

/// Raw query parameters of the discount routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscountParams {
    pub amount: Option<String>,
    pub percentage: Option<String>,
    pub category: Option<String>,
    pub points: Option<String>,
    pub threshold: Option<String>,
    pub discount: Option<String>,
}

/// `data` of a successful calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalPrice {
    pub final_price: f64,
}

fn parse_f64(raw: &Option<String>) -> f64 {
    raw.as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0)
}

fn parse_i64(raw: &Option<String>) -> i64 {
    raw.as_deref()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

fn money(raw: &Option<String>) -> Money {
    Money::from_major_f64(parse_f64(raw))
}

fn percent(raw: &Option<String>) -> Percentage {
    Percentage::from_percent(parse_f64(raw))
}

async fn calculate(
    state: AppState,
    cart_id: &str,
    strategy: DiscountStrategy,
) -> ApiResult<ApiResponse<FinalPrice>> {
    let total = DiscountService::new(state).calculate(cart_id, &strategy).await?;
    Ok(ApiResponse::ok(
        messages::DISCOUNT_CALCULATED,
        FinalPrice {
            final_price: total.to_major_f64(),
        },
    ))
}

pub async fn fixed_amount(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
    Query(params): Query<DiscountParams>,
) -> ApiResult<ApiResponse<FinalPrice>> {
    let strategy = DiscountStrategy::FixedAmount {
        amount: money(&params.amount),
    };
    calculate(state, &cart_id, strategy).await
}

pub async fn percentage(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
    Query(params): Query<DiscountParams>,
) -> ApiResult<ApiResponse<FinalPrice>> {
    let strategy = DiscountStrategy::Percentage {
        percentage: percent(&params.percentage),
    };
    calculate(state, &cart_id, strategy).await
}

pub async fn category(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
    Query(params): Query<DiscountParams>,
) -> ApiResult<ApiResponse<FinalPrice>> {
    let strategy = DiscountStrategy::Category {
        category: params.category.clone().unwrap_or_default(),
        percentage: percent(&params.percentage),
    };
    calculate(state, &cart_id, strategy).await
}

pub async fn points(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
    Query(params): Query<DiscountParams>,
) -> ApiResult<ApiResponse<FinalPrice>> {
    let strategy = DiscountStrategy::Points {
        points: parse_i64(&params.points),
    };
    calculate(state, &cart_id, strategy).await
}

pub async fn special(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
    Query(params): Query<DiscountParams>,
) -> ApiResult<ApiResponse<FinalPrice>> {
    let strategy = DiscountStrategy::Threshold {
        threshold: money(&params.threshold),
        discount: money(&params.discount),
    };
    calculate(state, &cart_id, strategy).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_malformed_numbers_read_as_zero() {
        assert_eq!(parse_f64(&some("abc")), 0.0);
        assert_eq!(parse_f64(&None), 0.0);
        assert_eq!(parse_f64(&some("nan")), 0.0);
        assert_eq!(parse_i64(&some("12.5")), 0);
        assert_eq!(parse_i64(&some("")), 0);
    }

    #[test]
    fn test_units_conversion() {
        assert_eq!(money(&some("12.34")).cents(), 1234);
        assert_eq!(money(&some(" 100 ")).cents(), 10_000);
        assert_eq!(percent(&some("12.5")).bps(), 1250);
        assert_eq!(percent(&some("-5")).bps(), -500);
        assert_eq!(parse_i64(&some("68")), 68);
    }

    #[test]
    fn test_infinity_saturates() {
        assert_eq!(parse_f64(&some("inf")), f64::INFINITY);
        assert_eq!(money(&some("Infinity")).cents(), i64::MAX);
        assert_eq!(money(&some("-inf")).cents(), i64::MIN);
        assert!(!percent(&some("inf")).is_within_range());
    }

    #[test]
    fn test_sub_unit_values_keep_their_side() {
        assert!(money(&some("-0.004")).is_negative());
        assert!(money(&some("0.004")).is_positive());
        assert!(!percent(&some("100.004")).is_within_range());
        assert!(!percent(&some("-0.001")).is_within_range());
        assert_eq!(percent(&some("0.001")).bps(), 0);
    }
}
