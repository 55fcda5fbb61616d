//! Application state

use std::sync::Arc;

use sso_auth_core::{Auth, AuthService};
use sso_db::sqlite::{SqliteAppRepository, SqliteUserRepository};
use sso_db::{create_pool_with_options, DbPool, PoolOptions, Repositories};

use crate::config::Config;
use crate::grpc::GrpcAuthService;

/// Type alias for the auth service with concrete repository types
pub type AuthServiceImpl = AuthService<SqliteUserRepository, SqliteAppRepository>;

/// Application state shared by the server
#[derive(Clone)]
pub struct AppState {
    /// Registration and login
    pub auth: Arc<AuthServiceImpl>,
    /// Database connection pool
    pub pool: DbPool,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state over an existing pool
    pub fn new(pool: DbPool, config: Config) -> anyhow::Result<Self> {
        let repos = Repositories::new(pool.clone());
        let auth = AuthService::new(
            config.auth.clone(),
            Arc::new(repos.users),
            Arc::new(repos.apps),
        )?;

        Ok(Self {
            auth: Arc::new(auth),
            pool,
            config: Arc::new(config),
        })
    }

    /// Open the database and build state. The schema must already be migrated.
    pub async fn connect(config: Config) -> anyhow::Result<Self> {
        let pool = create_pool_with_options(
            &config.database_url,
            PoolOptions::default().with_max_connections(config.db_max_connections),
        )
        .await?;
        tracing::info!("Connected to database");

        Self::new(pool, config)
    }

    /// The gRPC front end, backed only by the [`Auth`] capability
    pub fn grpc_service(&self) -> GrpcAuthService {
        let auth: Arc<dyn Auth> = self.auth.clone();
        GrpcAuthService::new(auth)
    }
}
