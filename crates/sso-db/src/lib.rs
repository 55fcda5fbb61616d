//! SSO DB - Storage layer
//!
//! SQLx-based credential store and application registry backed by SQLite.
//!
//! # Example
//!
//! ```rust,ignore
//! use sso_db::{create_pool_with_options, PoolOptions, Repositories, UserRepository};
//!
//! let pool = create_pool_with_options("sqlite://storage/sso.db", PoolOptions::default()).await?;
//! let repos = Repositories::new(pool);
//!
//! let user = repos.users.find_by_email("user@example.com").await?;
//! ```

pub mod error;
pub mod migrate;
pub mod models;
pub mod pool;
pub mod repo;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use migrate::{MigrationReport, Migrator};
pub use models::*;
pub use pool::{create_pool_with_options, DbPool, PoolOptions};
pub use repo::*;
pub use sqlite::Repositories;
