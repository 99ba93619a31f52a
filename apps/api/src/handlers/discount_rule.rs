//! Discount rule handlers.
//!
//! Rules are stored configuration. They describe a discount attached to a
//! campaign but are not applied automatically; the `/discounts` routes take
//! their parameters from the query string.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use playtowin_core::validation::{
    validate_name, validate_non_negative, validate_percentage, validate_uuid,
};
use playtowin_core::{DiscountRule, DiscountType, Percentage, ValidationError};

use super::JsonBody;
use crate::error::ApiResult;
use crate::response::{messages::discount_rule as msg, ApiResponse};
use crate::AppState;

/// Body of discount rule create / update. Amounts are in cents,
/// percentages in basis points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountRuleRequest {
    pub campaign_id: String,
    pub discount_type: DiscountType,
    #[serde(default)]
    pub amount_cents: i64,
    #[serde(default)]
    pub percentage_bps: i64,
    #[serde(default)]
    pub item_category: String,
    #[serde(default)]
    pub points_ratio: f64,
    #[serde(default)]
    pub max_discount_bps: i64,
    #[serde(default)]
    pub threshold_amount_cents: i64,
    #[serde(default)]
    pub discount_percentage_threshold_bps: i64,
}

impl DiscountRuleRequest {
    fn validate(&self) -> ApiResult<()> {
        validate_uuid("campaign_id", &self.campaign_id)?;
        validate_non_negative("amount_cents", self.amount_cents)?;
        validate_percentage("percentage_bps", Percentage::from_bps(self.percentage_bps))?;
        validate_percentage("max_discount_bps", Percentage::from_bps(self.max_discount_bps))?;
        validate_percentage(
            "discount_percentage_threshold_bps",
            Percentage::from_bps(self.discount_percentage_threshold_bps),
        )?;
        validate_non_negative("threshold_amount_cents", self.threshold_amount_cents)?;

        if !self.points_ratio.is_finite() || self.points_ratio < 0.0 {
            return Err(ValidationError::InvalidFormat {
                field: "points_ratio".to_string(),
                reason: "must be a non-negative number".to_string(),
            }
            .into());
        }

        if self.discount_type == DiscountType::Category {
            validate_name("item_category", &self.item_category)?;
        }

        Ok(())
    }

    fn apply_to(self, rule: &mut DiscountRule) {
        rule.campaign_id = self.campaign_id;
        rule.discount_type = self.discount_type;
        rule.amount_cents = self.amount_cents;
        rule.percentage_bps = self.percentage_bps;
        rule.item_category = self.item_category.trim().to_string();
        rule.points_ratio = self.points_ratio;
        rule.max_discount_bps = self.max_discount_bps;
        rule.threshold_amount_cents = self.threshold_amount_cents;
        rule.discount_percentage_threshold_bps = self.discount_percentage_threshold_bps;
    }
}

/// Optional filter for `GET /discount-rules`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleFilter {
    pub campaign_id: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<RuleFilter>,
) -> ApiResult<ApiResponse<Vec<DiscountRule>>> {
    let repo = state.db.discount_rules();
    let rules = match filter.campaign_id {
        Some(campaign_id) => repo.find_by_campaign_id(&campaign_id).await?,
        None => repo.find_all().await?,
    };
    Ok(ApiResponse::ok(msg::LISTED, rules))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<DiscountRule>> {
    let rule = state.db.discount_rules().find_by_id(&id).await?;
    Ok(ApiResponse::ok(msg::RETRIEVED, rule))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<DiscountRuleRequest>,
) -> ApiResult<ApiResponse<DiscountRule>> {
    req.validate()?;

    let now = Utc::now();
    let mut rule = DiscountRule {
        id: Uuid::new_v4().to_string(),
        campaign_id: String::new(),
        discount_type: req.discount_type,
        amount_cents: 0,
        percentage_bps: 0,
        item_category: String::new(),
        points_ratio: 0.0,
        max_discount_bps: 0,
        threshold_amount_cents: 0,
        discount_percentage_threshold_bps: 0,
        created_at: now,
        updated_at: now,
        campaign_name: None,
    };
    req.apply_to(&mut rule);

    let rule = state.db.discount_rules().create(&rule).await?;
    info!(
        id = %rule.id,
        campaign_id = %rule.campaign_id,
        discount_type = ?rule.discount_type,
        "Discount rule created"
    );
    Ok(ApiResponse::created(msg::CREATED, rule))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<DiscountRuleRequest>,
) -> ApiResult<ApiResponse<DiscountRule>> {
    req.validate()?;

    let repo = state.db.discount_rules();
    let mut rule = repo.find_by_id(&id).await?;
    req.apply_to(&mut rule);

    let rule = repo.update(&rule).await?;
    Ok(ApiResponse::ok(msg::UPDATED, rule))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.db.discount_rules().delete(&id).await?;
    info!(id = %id, "Discount rule deleted");
    Ok(ApiResponse::empty(StatusCode::OK, msg::DELETED))
}
