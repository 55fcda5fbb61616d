//! Common test utilities for sso-db integration tests

use std::path::PathBuf;

use sso_db::{create_pool_with_options, DbPool, Migrator, PoolOptions};

/// Schema migrations shipped with the repository
pub fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../migrations")
}

/// Fresh in-memory database with the schema applied
#[allow(dead_code)]
pub async fn memory_pool() -> DbPool {
    let pool = create_pool_with_options("sqlite::memory:", PoolOptions::default().with_max_connections(1))
        .await
        .unwrap();
    Migrator::from_dir(migrations_dir(), Migrator::DEFAULT_TABLE)
        .unwrap()
        .run(&pool)
        .await
        .unwrap();
    pool
}

/// Provision an application row the way the out-of-band seeding does
#[allow(dead_code)]
pub async fn seed_app(pool: &DbPool, id: i32, name: &str, secret: &str, ttl_secs: Option<i64>) {
    sqlx::query("INSERT INTO apps (id, name, secret, token_ttl_secs) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(secret)
        .bind(ttl_secs)
        .execute(pool)
        .await
        .unwrap();
}
