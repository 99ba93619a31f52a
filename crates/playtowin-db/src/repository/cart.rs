//! # Cart Repository
//!
//! Database operations for shopping carts.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use playtowin_core::Cart;

/// Repository for cart database operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Inserts a new cart.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - owner doesn't exist
    pub async fn create(&self, cart: &Cart) -> DbResult<Cart> {
        debug!(id = %cart.id, user_id = %cart.user_id, "Inserting cart");

        sqlx::query(
            r#"
            INSERT INTO carts (id, user_id, total_amount_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&cart.id)
        .bind(&cart.user_id)
        .bind(cart.total_amount_cents)
        .bind(cart.created_at)
        .bind(cart.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(cart.clone())
    }

    /// Gets a cart by ID.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Cart> {
        sqlx::query_as::<_, Cart>(
            r#"
            SELECT id, user_id, total_amount_cents, created_at, updated_at
            FROM carts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Cart", id))
    }

    /// Lists every cart.
    pub async fn find_all(&self) -> DbResult<Vec<Cart>> {
        let carts = sqlx::query_as::<_, Cart>(
            r#"
            SELECT id, user_id, total_amount_cents, created_at, updated_at
            FROM carts
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(carts)
    }

    /// Lists the carts owned by one user.
    pub async fn find_by_user_id(&self, user_id: &str) -> DbResult<Vec<Cart>> {
        let carts = sqlx::query_as::<_, Cart>(
            r#"
            SELECT id, user_id, total_amount_cents, created_at, updated_at
            FROM carts
            WHERE user_id = ?1
            ORDER BY created_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(user_id = %user_id, count = carts.len(), "Listed carts for user");
        Ok(carts)
    }

    /// Updates the stored total. Ownership never changes.
    pub async fn update(&self, cart: &Cart) -> DbResult<Cart> {
        debug!(id = %cart.id, total_amount_cents = cart.total_amount_cents, "Updating cart");

        let result = sqlx::query(
            r#"
            UPDATE carts SET
                total_amount_cents = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(&cart.id)
        .bind(cart.total_amount_cents)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Cart", &cart.id));
        }

        self.find_by_id(&cart.id).await
    }

    /// Deletes a cart and its items.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting cart");

        let result = sqlx::query("DELETE FROM carts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Cart", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::fixtures;
    use crate::DbError;

    #[tokio::test]
    async fn test_cart_crud() {
        let db = fixtures::db().await;
        let ann = db.users().create(&fixtures::user("ann@example.com")).await.unwrap();
        let bob = db.users().create(&fixtures::user("bob@example.com")).await.unwrap();
        let repo = db.carts();

        let cart = repo.create(&fixtures::cart(&ann.id)).await.unwrap();
        repo.create(&fixtures::cart(&ann.id)).await.unwrap();
        repo.create(&fixtures::cart(&bob.id)).await.unwrap();

        assert_eq!(repo.find_by_user_id(&ann.id).await.unwrap().len(), 2);
        assert_eq!(repo.find_by_user_id(&bob.id).await.unwrap().len(), 1);
        assert_eq!(repo.find_all().await.unwrap().len(), 3);

        let mut changed = cart.clone();
        changed.total_amount_cents = 12_345;
        changed.user_id = bob.id.clone();
        let updated = repo.update(&changed).await.unwrap();
        assert_eq!(updated.total_amount_cents, 12_345);
        assert_eq!(updated.user_id, ann.id);

        repo.delete(&cart.id).await.unwrap();
        assert!(matches!(repo.find_by_id(&cart.id).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_cart_requires_user() {
        let db = fixtures::db().await;
        let result = db.carts().create(&fixtures::cart("nobody")).await;
        assert!(matches!(result, Err(DbError::ForeignKeyViolation { .. })));
    }
}
