//! SQLite application repository implementation

use async_trait::async_trait;
use sqlx::SqlitePool;
use sso_types::AppId;

use crate::error::DbResult;
use crate::models::AppRow;
use crate::repo::AppRepository;

/// SQLite application repository
#[derive(Clone)]
pub struct SqliteAppRepository {
    pool: SqlitePool,
}

impl SqliteAppRepository {
    /// Create a new application repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppRepository for SqliteAppRepository {
    async fn find_by_id(&self, id: AppId) -> DbResult<AppRow> {
        let app = sqlx::query_as::<_, AppRow>(
            r#"
            SELECT id, name, secret, token_ttl_secs
            FROM apps
            WHERE id = ?
            "#,
        )
        .bind(id.0)
        .fetch_one(&self.pool)
        .await?;

        Ok(app)
    }
}
