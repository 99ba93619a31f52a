//! # User Repository
//!
//! Database operations for accounts.
//!
//! Besides CRUD this stores the latest refresh token per user; a refresh is
//! honoured only while the presented token equals the stored one.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use playtowin_core::User;

const USER_COLUMNS: &str = r#"
    id, name, email, password_hash, role, refresh_token, created_at, updated_at
"#;

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - email already registered
    pub async fn create(&self, user: &User) -> DbResult<User> {
        debug!(id = %user.id, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, password_hash, role, refresh_token, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(&user.refresh_token)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("email", &user.email),
            other => other,
        })?;

        Ok(user.clone())
    }

    /// Gets a user by ID.
    pub async fn find_by_id(&self, id: &str) -> DbResult<User> {
        let sql = format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS);

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("User", id))
    }

    /// Gets a user by email.
    ///
    /// ## Returns
    /// * `Ok(None)` - no such account (not an error: login and register
    ///   both branch on it)
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS);

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Lists all users.
    pub async fn find_all(&self) -> DbResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY created_at, id", USER_COLUMNS);

        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;

        Ok(users)
    }

    /// Updates name, email, password hash and role.
    pub async fn update(&self, user: &User) -> DbResult<User> {
        debug!(id = %user.id, "Updating user");

        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = ?2,
                email = ?3,
                password_hash = ?4,
                role = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", &user.id));
        }

        self.find_by_id(&user.id).await
    }

    /// Replaces the stored refresh token.
    pub async fn update_refresh_token(&self, id: &str, refresh_token: &str) -> DbResult<()> {
        debug!(id = %id, "Rotating refresh token");

        let result = sqlx::query(
            r#"
            UPDATE users SET refresh_token = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(refresh_token)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }

    /// Deletes a user and, through the foreign keys, their carts.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use playtowin_core::Role;

    use crate::repository::fixtures;
    use crate::DbError;

    #[tokio::test]
    async fn test_user_lookup() {
        let db = fixtures::db().await;
        let repo = db.users();

        let created = repo.create(&fixtures::user("ann@example.com")).await.unwrap();

        let by_email = repo.find_by_email("ann@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
        assert_eq!(by_email.role, Role::User);
        assert!(repo.find_by_email("bob@example.com").await.unwrap().is_none());

        let by_id = repo.find_by_id(&created.id).await.unwrap();
        assert_eq!(by_id.email, "ann@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let db = fixtures::db().await;
        let repo = db.users();

        repo.create(&fixtures::user("ann@example.com")).await.unwrap();
        let err = repo.create(&fixtures::user("ann@example.com")).await.unwrap_err();
        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "email");
                assert_eq!(value, "ann@example.com");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refresh_token_rotation() {
        let db = fixtures::db().await;
        let repo = db.users();
        let user = repo.create(&fixtures::user("ann@example.com")).await.unwrap();

        repo.update_refresh_token(&user.id, "first").await.unwrap();
        repo.update_refresh_token(&user.id, "second").await.unwrap();

        let stored = repo.find_by_id(&user.id).await.unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("second"));

        assert!(matches!(
            repo.update_refresh_token("ghost", "x").await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = fixtures::db().await;
        let repo = db.users();
        let user = repo.create(&fixtures::user("ann@example.com")).await.unwrap();

        let mut promoted = user.clone();
        promoted.role = Role::Admin;
        assert_eq!(repo.update(&promoted).await.unwrap().role, Role::Admin);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);

        repo.delete(&user.id).await.unwrap();
        assert!(matches!(repo.find_by_id(&user.id).await, Err(DbError::NotFound { .. })));
    }
}
