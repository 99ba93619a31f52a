//! Campaign handlers.
//!
//! A new campaign is active and runs for seven days from now unless the
//! request says otherwise. On update, omitted optional fields keep their
//! stored values.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use playtowin_core::validation::validate_name;
use playtowin_core::{Campaign, ValidationError};

use super::JsonBody;
use crate::error::ApiResult;
use crate::response::{messages::campaign as msg, ApiResponse};
use crate::AppState;

/// Default campaign length.
const DEFAULT_CAMPAIGN_DAYS: i64 = 7;

/// Body of campaign create / update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRequest {
    pub name: String,
    pub category: String,
    pub is_active: Option<bool>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl CampaignRequest {
    fn validate(&self) -> ApiResult<()> {
        validate_name("name", &self.name)?;
        validate_name("category", &self.category)?;
        Ok(())
    }
}

fn validate_window(campaign: &Campaign) -> ApiResult<()> {
    if campaign.end_date < campaign.start_date {
        return Err(ValidationError::InvalidFormat {
            field: "end_date".to_string(),
            reason: "must not be before start_date".to_string(),
        }
        .into());
    }
    Ok(())
}

pub async fn list(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Campaign>>> {
    let campaigns = state.db.campaigns().find_all().await?;
    Ok(ApiResponse::ok(msg::LISTED, campaigns))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Campaign>> {
    let campaign = state.db.campaigns().find_by_id(&id).await?;
    Ok(ApiResponse::ok(msg::RETRIEVED, campaign))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CampaignRequest>,
) -> ApiResult<ApiResponse<Campaign>> {
    req.validate()?;

    let now = Utc::now();
    let start_date = req.start_date.unwrap_or(now);
    let campaign = Campaign {
        id: Uuid::new_v4().to_string(),
        name: req.name.trim().to_string(),
        category: req.category.trim().to_string(),
        is_active: req.is_active.unwrap_or(true),
        start_date,
        end_date: req
            .end_date
            .unwrap_or(start_date + Duration::days(DEFAULT_CAMPAIGN_DAYS)),
        created_at: now,
        updated_at: now,
    };
    validate_window(&campaign)?;

    let campaign = state.db.campaigns().create(&campaign).await?;
    info!(
        id = %campaign.id,
        category = %campaign.category,
        end_date = %campaign.end_date,
        "Campaign created"
    );
    Ok(ApiResponse::created(msg::CREATED, campaign))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<CampaignRequest>,
) -> ApiResult<ApiResponse<Campaign>> {
    req.validate()?;

    let repo = state.db.campaigns();
    let mut campaign = repo.find_by_id(&id).await?;
    campaign.name = req.name.trim().to_string();
    campaign.category = req.category.trim().to_string();
    if let Some(is_active) = req.is_active {
        campaign.is_active = is_active;
    }
    if let Some(start_date) = req.start_date {
        campaign.start_date = start_date;
    }
    if let Some(end_date) = req.end_date {
        campaign.end_date = end_date;
    }
    validate_window(&campaign)?;

    let campaign = repo.update(&campaign).await?;
    Ok(ApiResponse::ok(msg::UPDATED, campaign))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.db.campaigns().delete(&id).await?;
    info!(id = %id, "Campaign deleted");
    Ok(ApiResponse::empty(StatusCode::OK, msg::DELETED))
}
