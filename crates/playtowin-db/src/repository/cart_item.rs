//! # Cart Item Repository
//!
//! Database operations for cart lines.
//!
//! ## Product Projection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart_items ci ──LEFT JOIN── products p ON p.id = ci.product_id         │
//! │                                                                         │
//! │  ci.*  (category, unit/total price as written by the client)            │
//! │  p.name, p.description, p.image, p.price_cents  → product_* fields      │
//! │                                                                         │
//! │  Product deleted? Line survives, product_* come back NULL.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The discount engine reads the line's own `category` and
//! `total_price_cents`, never the joined product price.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use playtowin_core::CartItem;

const SELECT_JOINED: &str = r#"
    SELECT
        ci.id, ci.cart_id, ci.product_id, ci.quantity, ci.category,
        ci.unit_price_cents, ci.total_price_cents, ci.created_at, ci.updated_at,
        p.name AS product_name,
        p.description AS product_description,
        p.image AS product_image,
        p.price_cents AS product_price_cents
    FROM cart_items ci
    LEFT JOIN products p ON p.id = ci.product_id
"#;

/// Repository for cart item database operations.
#[derive(Debug, Clone)]
pub struct CartItemRepository {
    pool: SqlitePool,
}

impl CartItemRepository {
    /// Creates a new CartItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartItemRepository { pool }
    }

    /// Inserts a new line and returns it with the product projection.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - cart doesn't exist
    pub async fn create(&self, item: &CartItem) -> DbResult<CartItem> {
        debug!(
            id = %item.id,
            cart_id = %item.cart_id,
            product_id = %item.product_id,
            quantity = item.quantity,
            "Inserting cart item"
        );

        sqlx::query(
            r#"
            INSERT INTO cart_items (
                id, cart_id, product_id, quantity, category,
                unit_price_cents, total_price_cents, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&item.id)
        .bind(&item.cart_id)
        .bind(&item.product_id)
        .bind(item.quantity)
        .bind(&item.category)
        .bind(item.unit_price_cents)
        .bind(item.total_price_cents)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        self.find_by_id(&item.id).await
    }

    /// Gets a line by ID.
    pub async fn find_by_id(&self, id: &str) -> DbResult<CartItem> {
        let sql = format!("{} WHERE ci.id = ?1", SELECT_JOINED);

        sqlx::query_as::<_, CartItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("CartItem", id))
    }

    /// Lists the lines of a cart in insertion order.
    ///
    /// An unknown cart id yields an empty list, which the discount engine
    /// then rejects as an empty cart.
    pub async fn find_by_cart_id(&self, cart_id: &str) -> DbResult<Vec<CartItem>> {
        let sql = format!(
            "{} WHERE ci.cart_id = ?1 ORDER BY ci.created_at, ci.id",
            SELECT_JOINED
        );

        let items = sqlx::query_as::<_, CartItem>(&sql)
            .bind(cart_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(cart_id = %cart_id, count = items.len(), "Loaded cart items");
        Ok(items)
    }

    /// Lists every line of every cart.
    pub async fn find_all(&self) -> DbResult<Vec<CartItem>> {
        let sql = format!("{} ORDER BY ci.cart_id, ci.created_at, ci.id", SELECT_JOINED);

        let items = sqlx::query_as::<_, CartItem>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Updates product, quantity, category and prices of a line.
    ///
    /// The owning cart never changes.
    pub async fn update(&self, item: &CartItem) -> DbResult<CartItem> {
        debug!(id = %item.id, quantity = item.quantity, "Updating cart item");

        let result = sqlx::query(
            r#"
            UPDATE cart_items SET
                product_id = ?2,
                quantity = ?3,
                category = ?4,
                unit_price_cents = ?5,
                total_price_cents = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.product_id)
        .bind(item.quantity)
        .bind(&item.category)
        .bind(item.unit_price_cents)
        .bind(item.total_price_cents)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("CartItem", &item.id));
        }

        self.find_by_id(&item.id).await
    }

    /// Deletes a line.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting cart item");

        let result = sqlx::query("DELETE FROM cart_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("CartItem", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::fixtures;
    use crate::{Database, DbError};

    async fn cart_with_owner(db: &Database) -> String {
        let user = db.users().create(&fixtures::user("ann@example.com")).await.unwrap();
        db.carts().create(&fixtures::cart(&user.id)).await.unwrap().id
    }

    #[tokio::test]
    async fn test_items_join_product() {
        let db = fixtures::db().await;
        let cart_id = cart_with_owner(&db).await;
        let product = db.products().create(&fixtures::product("Runner", 2_500)).await.unwrap();
        let repo = db.cart_items();

        let created = repo
            .create(&fixtures::cart_item(&cart_id, &product.id, 2, 2_500))
            .await
            .unwrap();
        assert_eq!(created.product_name.as_deref(), Some("Runner"));
        assert_eq!(created.product_price_cents, Some(2_500));
        assert_eq!(created.total_price_cents, 5_000);

        let items = repo.find_by_cart_id(&cart_id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_image.as_deref(), Some("https://img.example.com/p.png"));
    }

    #[tokio::test]
    async fn test_item_survives_product_delete() {
        let db = fixtures::db().await;
        let cart_id = cart_with_owner(&db).await;
        let product = db.products().create(&fixtures::product("Runner", 2_500)).await.unwrap();
        let item = db
            .cart_items()
            .create(&fixtures::cart_item(&cart_id, &product.id, 1, 2_500))
            .await
            .unwrap();

        db.products().delete(&product.id).await.unwrap();

        let found = db.cart_items().find_by_id(&item.id).await.unwrap();
        assert!(found.product_name.is_none());
        assert!(found.product_price_cents.is_none());
        assert_eq!(found.unit_price_cents, 2_500);
    }

    #[tokio::test]
    async fn test_unknown_cart_has_no_items() {
        let db = fixtures::db().await;
        assert!(db.cart_items().find_by_cart_id("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_item_update_delete_and_cascade() {
        let db = fixtures::db().await;
        let cart_id = cart_with_owner(&db).await;
        let repo = db.cart_items();

        let first = repo
            .create(&fixtures::cart_item(&cart_id, "p-1", 1, 1_000))
            .await
            .unwrap();
        let second = repo
            .create(&fixtures::cart_item(&cart_id, "p-2", 1, 1_000))
            .await
            .unwrap();

        let mut changed = first.clone();
        changed.quantity = 3;
        changed.total_price_cents = 3_000;
        let updated = repo.update(&changed).await.unwrap();
        assert_eq!((updated.quantity, updated.total_price_cents), (3, 3_000));
        assert_eq!(repo.find_all().await.unwrap().len(), 2);

        repo.delete(&first.id).await.unwrap();
        assert!(matches!(repo.delete(&first.id).await, Err(DbError::NotFound { .. })));

        db.carts().delete(&cart_id).await.unwrap();
        assert!(matches!(repo.find_by_id(&second.id).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_item_requires_cart() {
        let db = fixtures::db().await;
        let result = db
            .cart_items()
            .create(&fixtures::cart_item("no-cart", "p-1", 1, 100))
            .await;
        assert!(matches!(result, Err(DbError::ForeignKeyViolation { .. })));
    }
}
