//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use sso_types::{AppId, UserId};

use crate::error::DbResult;
use crate::models::*;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// Returns [`DbError::AlreadyExists`](crate::DbError::AlreadyExists) when
    /// the email is taken. Implementations must let the storage engine decide
    /// this atomically instead of looking the email up first.
    async fn create(&self, user: CreateUser) -> DbResult<UserId>;

    /// Find a user by email, [`DbError::NotFound`](crate::DbError::NotFound) if absent
    async fn find_by_email(&self, email: &str) -> DbResult<UserRow>;
}

/// Create user input
#[derive(Clone)]
pub struct CreateUser {
    pub email: String,
    pub pass_hash: String,
}

impl std::fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUser")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Application repository trait
#[async_trait]
pub trait AppRepository: Send + Sync {
    /// Find an application by ID, [`DbError::NotFound`](crate::DbError::NotFound) if unknown
    async fn find_by_id(&self, id: AppId) -> DbResult<AppRow>;
}
