//! # Category Repository
//!
//! Database operations for product categories.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use playtowin_core::Category;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Inserts a new category (id generated beforehand).
    pub async fn create(&self, category: &Category) -> DbResult<Category> {
        debug!(id = %category.id, name = %category.name, "Inserting category");

        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(category.clone())
    }

    /// Gets a category by its ID.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Category", id))
    }

    /// Lists all categories, oldest first.
    pub async fn find_all(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Updates name and description; returns the stored row.
    pub async fn update(&self, category: &Category) -> DbResult<Category> {
        debug!(id = %category.id, "Updating category");

        let result = sqlx::query(
            r#"
            UPDATE categories SET
                name = ?2,
                description = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", &category.id));
        }

        self.find_by_id(&category.id).await
    }

    /// Deletes a category.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::fixtures;
    use crate::DbError;

    #[tokio::test]
    async fn test_category_crud() {
        let db = fixtures::db().await;
        let repo = db.categories();

        let created = repo.create(&fixtures::category("shoes")).await.unwrap();
        let found = repo.find_by_id(&created.id).await.unwrap();
        assert_eq!(found.name, "shoes");
        assert_eq!(found.description, "All things shoes");

        let mut changed = found.clone();
        changed.name = "sneakers".to_string();
        let updated = repo.update(&changed).await.unwrap();
        assert_eq!(updated.name, "sneakers");
        assert!(updated.updated_at >= found.updated_at);

        repo.create(&fixtures::category("hats")).await.unwrap();
        assert_eq!(repo.find_all().await.unwrap().len(), 2);

        repo.delete(&created.id).await.unwrap();
        assert!(matches!(
            repo.find_by_id(&created.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_category() {
        let db = fixtures::db().await;
        let repo = db.categories();

        assert!(matches!(repo.delete("nope").await, Err(DbError::NotFound { .. })));
        let ghost = fixtures::category("ghost");
        assert!(matches!(repo.update(&ghost).await, Err(DbError::NotFound { .. })));
    }
}
