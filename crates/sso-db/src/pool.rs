//! Database connection pool

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Database connection pool type alias
pub type DbPool = SqlitePool;

/// Pool tuning knobs
#[derive(Debug, Clone)]
pub struct PoolOptions {
    /// Upper bound on open connections
    pub max_connections: u32,
    /// Create the database file when it does not exist yet
    pub create_if_missing: bool,
    /// How long a writer waits on a locked database
    pub busy_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            create_if_missing: false,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

impl PoolOptions {
    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Create the database file on first connect
    pub fn with_create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }
}

/// Create a connection pool with explicit options.
///
/// `location` is either a `sqlite:` URL (including `sqlite::memory:`) or a
/// plain filesystem path.
pub async fn create_pool_with_options(
    location: &str,
    options: PoolOptions,
) -> Result<DbPool, sqlx::Error> {
    let connect = connect_options(location)?
        .create_if_missing(options.create_if_missing)
        .foreign_keys(true)
        .busy_timeout(options.busy_timeout);

    // Connections are never recycled: an in-memory database lives only as
    // long as the connection that opened it.
    SqlitePoolOptions::new()
        .max_connections(options.max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(connect)
        .await
}

fn connect_options(location: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    if location.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(location)
    } else {
        Ok(SqliteConnectOptions::new().filename(location))
    }
}
