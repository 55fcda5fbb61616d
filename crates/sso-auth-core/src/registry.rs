//! Application registry with read-through caching

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sso_db::{AppRepository, DbError};
use sso_types::AppId;

use crate::token::SigningSecret;
use crate::{AuthConfig, AuthError};

/// Signing configuration of one application
#[derive(Debug, Clone)]
pub struct ResolvedApp {
    pub id: AppId,
    pub name: String,
    pub secret: SigningSecret,
    pub token_ttl: Duration,
}

/// Resolves application ids to their signing secret and token lifetime.
///
/// Applications are provisioned out-of-band and rarely change, so hits are
/// served from memory. Unknown ids are never cached.
pub struct AppRegistry<A: AppRepository> {
    repo: Arc<A>,
    default_ttl: Duration,
    /// Cache of app_id -> resolved app
    cache: Cache<AppId, Arc<ResolvedApp>>,
}

impl<A: AppRepository> AppRegistry<A> {
    /// Create a new registry
    pub fn new(repo: Arc<A>, config: &AuthConfig) -> Self {
        Self {
            repo,
            default_ttl: config.default_token_ttl,
            cache: Cache::builder()
                .time_to_live(config.app_cache_ttl)
                .max_capacity(config.app_cache_capacity)
                .build(),
        }
    }

    /// Resolve an application.
    ///
    /// # Errors
    /// [`AuthError::UnknownApp`] if no such application is provisioned,
    /// [`AuthError::Configuration`] if its row is unusable.
    pub async fn resolve(&self, app_id: AppId) -> Result<Arc<ResolvedApp>, AuthError> {
        if let Some(app) = self.cache.get(&app_id).await {
            return Ok(app);
        }

        let row = match self.repo.find_by_id(app_id).await {
            Ok(row) => row,
            Err(DbError::NotFound) => {
                tracing::warn!(app_id = %app_id, "Login requested for unknown application");
                return Err(AuthError::UnknownApp(app_id));
            }
            Err(e) => return Err(e.into()),
        };

        let secret = SigningSecret::new(&row.secret).map_err(|e| {
            tracing::error!(app_id = %app_id, "Application has no usable secret: {}", e);
            e
        })?;

        let token_ttl = match row.token_ttl_secs {
            Some(secs) if secs > 0 => Duration::from_secs(secs.unsigned_abs()),
            Some(secs) => {
                tracing::warn!(app_id = %app_id, ttl = secs, "Ignoring non-positive token TTL");
                self.default_ttl
            }
            None => self.default_ttl,
        };

        let app = Arc::new(ResolvedApp {
            id: row.app_id(),
            name: row.name,
            secret,
            token_ttl,
        });

        self.cache.insert(app_id, Arc::clone(&app)).await;
        tracing::debug!(app_id = %app_id, name = %app.name, "Resolved application");

        Ok(app)
    }
}

impl<A: AppRepository> std::fmt::Debug for AppRegistry<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppRegistry")
            .field("default_ttl", &self.default_ttl)
            .field("cached", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}
