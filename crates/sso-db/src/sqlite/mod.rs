//! SQLite repository implementations

mod app;
mod user;

pub use app::SqliteAppRepository;
pub use user::SqliteUserRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub users: SqliteUserRepository,
    pub apps: SqliteAppRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: SqliteUserRepository::new(pool.clone()),
            apps: SqliteAppRepository::new(pool),
        }
    }
}
