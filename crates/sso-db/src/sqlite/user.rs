//! SQLite user repository implementation

use async_trait::async_trait;
use sqlx::SqlitePool;
use sso_types::UserId;

use crate::error::DbResult;
use crate::models::UserRow;
use crate::repo::{CreateUser, UserRepository};

/// SQLite user repository
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: CreateUser) -> DbResult<UserId> {
        // Single statement: the UNIQUE index on email arbitrates concurrent
        // registrations, a violation maps to DbError::AlreadyExists.
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, pass_hash)
            VALUES (?, ?)
            RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.pass_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(UserId(id))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<UserRow> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
