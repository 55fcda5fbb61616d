//! Integration tests for the SQLite repositories

mod common;

use sso_db::{
    create_pool_with_options, AppRepository, CreateUser, DbError, Migrator, PoolOptions,
    Repositories, UserRepository,
};
use sso_types::AppId;

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        pass_hash: "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
    }
}

#[tokio::test]
async fn test_create_and_find_user() {
    let repos = Repositories::new(common::memory_pool().await);

    let id = repos.users.create(new_user("alice@example.com")).await.unwrap();
    assert!(id.get() > 0);

    let row = repos.users.find_by_email("alice@example.com").await.unwrap();
    assert_eq!(row.user_id(), id);
    assert_eq!(row.email, "alice@example.com");
    assert!(row.pass_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_user_ids_are_distinct() {
    let repos = Repositories::new(common::memory_pool().await);

    let first = repos.users.create(new_user("a@example.com")).await.unwrap();
    let second = repos.users.create(new_user("b@example.com")).await.unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repos = Repositories::new(common::memory_pool().await);

    repos.users.create(new_user("dup@example.com")).await.unwrap();
    let err = repos.users.create(new_user("dup@example.com")).await.unwrap_err();
    assert!(matches!(err, DbError::AlreadyExists), "got {err:?}");
}

#[tokio::test]
async fn test_email_comparison_is_case_sensitive() {
    let repos = Repositories::new(common::memory_pool().await);

    repos.users.create(new_user("Bob@example.com")).await.unwrap();
    repos.users.create(new_user("bob@example.com")).await.unwrap();

    let err = repos.users.find_by_email("BOB@example.com").await.unwrap_err();
    assert!(matches!(err, DbError::NotFound));
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let repos = Repositories::new(common::memory_pool().await);

    let err = repos.users.find_by_email("ghost@example.com").await.unwrap_err();
    assert!(matches!(err, DbError::NotFound));
}

#[tokio::test]
async fn test_concurrent_registration_single_winner() {
    // File-backed so that every task gets its own connection.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sso.db");
    let pool = create_pool_with_options(
        path.to_str().unwrap(),
        PoolOptions::default()
            .with_max_connections(8)
            .with_create_if_missing(true),
    )
    .await
    .unwrap();
    Migrator::from_dir(common::migrations_dir(), Migrator::DEFAULT_TABLE)
        .unwrap()
        .run(&pool)
        .await
        .unwrap();

    let repos = Repositories::new(pool);
    let attempts = 16;
    let handles: Vec<_> = (0..attempts)
        .map(|_| {
            let users = repos.users.clone();
            tokio::spawn(async move { users.create(new_user("race@example.com")).await })
        })
        .collect();

    let results: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(DbError::AlreadyExists)))
        .count();
    assert_eq!(winners, 1);
    assert_eq!(duplicates, attempts - 1);
}

#[tokio::test]
async fn test_find_app() {
    let pool = common::memory_pool().await;
    common::seed_app(&pool, 10, "test", "test-secret", Some(900)).await;
    common::seed_app(&pool, 11, "legacy", "legacy-secret", None).await;
    let repos = Repositories::new(pool);

    let app = repos.apps.find_by_id(AppId(10)).await.unwrap();
    assert_eq!(app.app_id(), AppId(10));
    assert_eq!(app.secret, "test-secret");
    assert_eq!(app.token_ttl_secs, Some(900));

    let legacy = repos.apps.find_by_id(AppId(11)).await.unwrap();
    assert_eq!(legacy.token_ttl_secs, None);
}

#[tokio::test]
async fn test_unknown_app_is_not_found() {
    let repos = Repositories::new(common::memory_pool().await);

    let err = repos.apps.find_by_id(AppId(42)).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound));
}

#[tokio::test]
async fn test_debug_output_hides_secrets() {
    let pool = common::memory_pool().await;
    common::seed_app(&pool, 10, "test", "test-secret", None).await;
    let repos = Repositories::new(pool);
    repos.users.create(new_user("alice@example.com")).await.unwrap();

    let app = repos.apps.find_by_id(AppId(10)).await.unwrap();
    assert!(!format!("{app:?}").contains("test-secret"));

    let user = repos.users.find_by_email("alice@example.com").await.unwrap();
    assert!(!format!("{user:?}").contains("argon2id"));
}
