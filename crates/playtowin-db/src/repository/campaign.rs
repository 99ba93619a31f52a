//! # Campaign Repository
//!
//! Database operations for promotional campaigns.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use playtowin_core::Campaign;

const CAMPAIGN_COLUMNS: &str = r#"
    id, name, category, is_active, start_date, end_date, created_at, updated_at
"#;

/// Repository for campaign database operations.
#[derive(Debug, Clone)]
pub struct CampaignRepository {
    pool: SqlitePool,
}

impl CampaignRepository {
    /// Creates a new CampaignRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CampaignRepository { pool }
    }

    /// Inserts a new campaign.
    pub async fn create(&self, campaign: &Campaign) -> DbResult<Campaign> {
        debug!(id = %campaign.id, name = %campaign.name, "Inserting campaign");

        sqlx::query(
            r#"
            INSERT INTO campaigns (
                id, name, category, is_active, start_date, end_date, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&campaign.id)
        .bind(&campaign.name)
        .bind(&campaign.category)
        .bind(campaign.is_active)
        .bind(campaign.start_date)
        .bind(campaign.end_date)
        .bind(campaign.created_at)
        .bind(campaign.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(campaign.clone())
    }

    /// Gets a campaign by its ID.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Campaign> {
        let sql = format!("SELECT {} FROM campaigns WHERE id = ?1", CAMPAIGN_COLUMNS);

        sqlx::query_as::<_, Campaign>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Campaign", id))
    }

    /// Lists all campaigns, newest start date first.
    pub async fn find_all(&self) -> DbResult<Vec<Campaign>> {
        let sql = format!(
            "SELECT {} FROM campaigns ORDER BY start_date DESC, id",
            CAMPAIGN_COLUMNS
        );

        let campaigns = sqlx::query_as::<_, Campaign>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(campaigns)
    }

    /// Updates an existing campaign and returns the stored row.
    pub async fn update(&self, campaign: &Campaign) -> DbResult<Campaign> {
        debug!(id = %campaign.id, is_active = campaign.is_active, "Updating campaign");

        let result = sqlx::query(
            r#"
            UPDATE campaigns SET
                name = ?2,
                category = ?3,
                is_active = ?4,
                start_date = ?5,
                end_date = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&campaign.id)
        .bind(&campaign.name)
        .bind(&campaign.category)
        .bind(campaign.is_active)
        .bind(campaign.start_date)
        .bind(campaign.end_date)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Campaign", &campaign.id));
        }

        self.find_by_id(&campaign.id).await
    }

    /// Deletes a campaign together with its discount rules.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting campaign");

        let result = sqlx::query("DELETE FROM campaigns WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Campaign", id));
        }

        Ok(())
    }
}
