//! # Discount Rule Repository
//!
//! Database operations for discount rules.
//!
//! Lookups join the owning campaign so responses carry its name:
//! ```text
//! discount_rules r ──LEFT JOIN── campaigns c ON c.id = r.campaign_id
//!        │                              │
//!        └── all rule columns           └── c.name AS campaign_name
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use playtowin_core::DiscountRule;

const SELECT_JOINED: &str = r#"
    SELECT
        r.id, r.campaign_id, r.discount_type, r.amount_cents, r.percentage_bps,
        r.item_category, r.points_ratio, r.max_discount_bps,
        r.threshold_amount_cents, r.discount_percentage_threshold_bps,
        r.created_at, r.updated_at,
        c.name AS campaign_name
    FROM discount_rules r
    LEFT JOIN campaigns c ON c.id = r.campaign_id
"#;

/// Repository for discount rule database operations.
#[derive(Debug, Clone)]
pub struct DiscountRuleRepository {
    pool: SqlitePool,
}

impl DiscountRuleRepository {
    /// Creates a new DiscountRuleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DiscountRuleRepository { pool }
    }

    /// Inserts a new rule.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - campaign doesn't exist
    pub async fn create(&self, rule: &DiscountRule) -> DbResult<DiscountRule> {
        debug!(
            id = %rule.id,
            campaign_id = %rule.campaign_id,
            discount_type = ?rule.discount_type,
            "Inserting discount rule"
        );

        sqlx::query(
            r#"
            INSERT INTO discount_rules (
                id, campaign_id, discount_type, amount_cents, percentage_bps,
                item_category, points_ratio, max_discount_bps,
                threshold_amount_cents, discount_percentage_threshold_bps,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&rule.id)
        .bind(&rule.campaign_id)
        .bind(rule.discount_type)
        .bind(rule.amount_cents)
        .bind(rule.percentage_bps)
        .bind(&rule.item_category)
        .bind(rule.points_ratio)
        .bind(rule.max_discount_bps)
        .bind(rule.threshold_amount_cents)
        .bind(rule.discount_percentage_threshold_bps)
        .bind(rule.created_at)
        .bind(rule.updated_at)
        .execute(&self.pool)
        .await?;

        self.find_by_id(&rule.id).await
    }

    /// Gets a rule by its ID, with the campaign name.
    pub async fn find_by_id(&self, id: &str) -> DbResult<DiscountRule> {
        let sql = format!("{} WHERE r.id = ?1", SELECT_JOINED);

        sqlx::query_as::<_, DiscountRule>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("DiscountRule", id))
    }

    /// Lists all rules, with campaign names.
    pub async fn find_all(&self) -> DbResult<Vec<DiscountRule>> {
        let sql = format!("{} ORDER BY r.created_at, r.id", SELECT_JOINED);

        let rules = sqlx::query_as::<_, DiscountRule>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rules)
    }

    /// Lists the rules of one campaign.
    pub async fn find_by_campaign_id(&self, campaign_id: &str) -> DbResult<Vec<DiscountRule>> {
        let sql = format!(
            "{} WHERE r.campaign_id = ?1 ORDER BY r.created_at, r.id",
            SELECT_JOINED
        );

        let rules = sqlx::query_as::<_, DiscountRule>(&sql)
            .bind(campaign_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rules)
    }

    /// Updates an existing rule and returns the stored row.
    pub async fn update(&self, rule: &DiscountRule) -> DbResult<DiscountRule> {
        debug!(id = %rule.id, "Updating discount rule");

        let result = sqlx::query(
            r#"
            UPDATE discount_rules SET
                campaign_id = ?2,
                discount_type = ?3,
                amount_cents = ?4,
                percentage_bps = ?5,
                item_category = ?6,
                points_ratio = ?7,
                max_discount_bps = ?8,
                threshold_amount_cents = ?9,
                discount_percentage_threshold_bps = ?10,
                updated_at = ?11
            WHERE id = ?1
            "#,
        )
        .bind(&rule.id)
        .bind(&rule.campaign_id)
        .bind(rule.discount_type)
        .bind(rule.amount_cents)
        .bind(rule.percentage_bps)
        .bind(&rule.item_category)
        .bind(rule.points_ratio)
        .bind(rule.max_discount_bps)
        .bind(rule.threshold_amount_cents)
        .bind(rule.discount_percentage_threshold_bps)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("DiscountRule", &rule.id));
        }

        self.find_by_id(&rule.id).await
    }

    /// Deletes a rule.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting discount rule");

        let result = sqlx::query("DELETE FROM discount_rules WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("DiscountRule", id));
        }

        Ok(())
    }
}
