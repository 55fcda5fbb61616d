//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use sqlx::FromRow;
use sso_types::{AppId, User, UserId};

/// User row from the database
#[derive(Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub pass_hash: String,
}

impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> UserId {
        UserId(self.id)
    }

    /// Convert to the domain user
    pub fn into_user(self) -> User {
        User {
            id: UserId(self.id),
            email: self.email,
            pass_hash: self.pass_hash,
        }
    }
}

impl std::fmt::Debug for UserRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRow")
            .field("id", &self.id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Application row from the database
#[derive(Clone, FromRow)]
pub struct AppRow {
    pub id: i32,
    pub name: String,
    pub secret: String,
    /// Per-app token lifetime; `None` means the service default applies
    pub token_ttl_secs: Option<i64>,
}

impl AppRow {
    /// Convert to domain AppId
    pub fn app_id(&self) -> AppId {
        AppId(self.id)
    }
}

impl std::fmt::Debug for AppRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppRow")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish_non_exhaustive()
    }
}
