//! Per-application token signing
//!
//! Tokens are HS256 JWTs signed with the secret of the application they were
//! issued for. They carry everything needed to validate them offline.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sso_types::{AppId, User, UserId};

use crate::AuthError;

/// Claims carried by an issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID
    pub uid: i64,
    /// User email
    pub email: String,
    /// Application the token was issued for
    pub app_id: i32,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
}

impl TokenClaims {
    /// Get the user ID
    pub fn user_id(&self) -> UserId {
        UserId(self.uid)
    }

    /// Get the application ID
    pub fn app_id(&self) -> AppId {
        AppId(self.app_id)
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Signing secret of one application.
///
/// Never printed; `Debug` only shows the length.
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Arc<[u8]>,
}

impl SigningSecret {
    /// Wrap secret bytes.
    ///
    /// # Errors
    /// Returns [`AuthError::Configuration`] for an empty secret.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, AuthError> {
        let bytes = secret.as_ref();
        if bytes.is_empty() {
            return Err(AuthError::Configuration("signing secret is empty".to_string()));
        }
        Ok(Self {
            bytes: Arc::from(bytes),
        })
    }

    /// Raw secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningSecret")
            .field("key_length", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// Stateless token issuer.
///
/// The secret and lifetime are passed on every call, so requests for
/// different applications never share signing state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenIssuer;

impl TokenIssuer {
    pub fn new() -> Self {
        Self
    }

    /// Build and sign a token for `user` scoped to `app_id`.
    ///
    /// Deterministic for identical inputs and `now`.
    pub fn issue(
        &self,
        user: &User,
        app_id: AppId,
        secret: &SigningSecret,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let iat = now.timestamp();
        let exp = i64::try_from(ttl.as_secs())
            .ok()
            .and_then(|ttl| iat.checked_add(ttl))
            .ok_or_else(|| AuthError::Signing(format!("token ttl out of range: {ttl:?}")))?;

        let claims = TokenClaims {
            uid: user.id.get(),
            email: user.email.clone(),
            app_id: app_id.get(),
            iat,
            exp,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!(app_id = %app_id, "Failed to sign token: {}", e);
            AuthError::Signing(e.to_string())
        })
    }

    /// Verify a token offline against an application secret
    pub fn verify(&self, token: &str, secret: &SigningSecret) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!("Token validation failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        Ok(data.claims)
    }
}
