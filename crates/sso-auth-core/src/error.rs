//! Auth errors

use sso_types::AppId;
use thiserror::Error;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// A required request field was empty
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// Email already registered
    #[error("user already exists")]
    UserExists,

    /// Unknown email or wrong password; the two are deliberately indistinguishable
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Caller asked for an application the registry does not know
    #[error("unknown app_id {0}")]
    UnknownApp(AppId),

    /// Invalid token (malformed, bad signature, etc.)
    #[error("invalid token")]
    InvalidToken,

    /// Token has expired
    #[error("token expired")]
    TokenExpired,

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Token could not be signed
    #[error("token signing failed: {0}")]
    Signing(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Shorthand for [`AuthError::MissingField`]
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Whether the failure is on our side rather than the caller's
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Signing(_) | Self::Configuration(_) | Self::Internal(_)
        )
    }

    /// Message safe to hand to the caller. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        if self.is_internal() {
            "internal error".to_string()
        } else {
            self.to_string()
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "INVALID_ARGUMENT",
            Self::UserExists => "USER_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UnknownApp(_) => "UNKNOWN_APP",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Signing(_) => "SIGNING_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<sso_db::DbError> for AuthError {
    fn from(err: sso_db::DbError) -> Self {
        tracing::error!("Database error: {}", err);
        Self::Database(err.to_string())
    }
}
