//! Auth service - ties together credential storage, app resolution and token issuing

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sso_db::{AppRepository, CreateUser, DbError, UserRepository};
use sso_types::{AppId, UserId};

use crate::{
    config::AuthConfig,
    crypto::Argon2Hasher,
    registry::AppRegistry,
    token::TokenIssuer,
    validation::{validate_login, validate_register},
    AuthError,
};

/// Registration and login, as exposed to the RPC layer.
///
/// The transport depends on this trait only, never on [`AuthService`].
#[async_trait]
pub trait Auth: Send + Sync {
    /// Register a new user and return its id
    async fn register(&self, email: &str, password: &str) -> Result<UserId, AuthError>;

    /// Check credentials and return a token signed for `app_id`
    async fn login(&self, email: &str, password: &str, app_id: AppId)
        -> Result<String, AuthError>;
}

/// Authentication service
///
/// Provides unified interface for:
/// - User registration (Argon2id hashed credentials)
/// - Login with per-application tokens
pub struct AuthService<U: UserRepository, A: AppRepository> {
    config: AuthConfig,
    users: Arc<U>,
    apps: AppRegistry<A>,
    hasher: Argon2Hasher,
    issuer: TokenIssuer,
}

impl<U: UserRepository, A: AppRepository> AuthService<U, A> {
    /// Create a new auth service
    ///
    /// # Errors
    /// Returns [`AuthError::Configuration`] if the hashing parameters are invalid.
    pub fn new(config: AuthConfig, users: Arc<U>, apps: Arc<A>) -> Result<Self, AuthError> {
        Ok(Self {
            hasher: Argon2Hasher::new(&config.hashing)?,
            apps: AppRegistry::new(apps, &config),
            issuer: TokenIssuer::new(),
            users,
            config,
        })
    }
}

#[async_trait]
impl<U: UserRepository, A: AppRepository> Auth for AuthService<U, A> {
    async fn register(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        validate_register(email, password)?;

        let pass_hash = self.hasher.hash(password).await?;

        let new_user = CreateUser {
            email: email.to_string(),
            pass_hash,
        };

        match self.users.create(new_user).await {
            Ok(user_id) => {
                tracing::info!(user_id = %user_id, "Registered user");
                Ok(user_id)
            }
            Err(DbError::AlreadyExists) => {
                tracing::debug!(email, "Registration rejected: email taken");
                Err(AuthError::UserExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
        app_id: AppId,
    ) -> Result<String, AuthError> {
        validate_login(email, password, app_id)?;

        let app = self.apps.resolve(app_id).await?;

        let user = match self.users.find_by_email(email).await {
            Ok(row) => row.into_user(),
            Err(DbError::NotFound) => {
                self.hasher.verify_decoy(password).await?;
                tracing::debug!(email, "Login rejected: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        if !self.hasher.verify(password, &user.pass_hash).await? {
            tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .issuer
            .issue(&user, app.id, &app.secret, app.token_ttl, Utc::now())?;

        tracing::info!(user_id = %user.id, app_id = %app.id, "User logged in");
        Ok(token)
    }
}

impl<U: UserRepository, A: AppRepository> std::fmt::Debug for AuthService<U, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("config", &self.config)
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}
