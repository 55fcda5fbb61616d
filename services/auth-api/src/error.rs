//! Translation of auth outcomes into gRPC statuses.

use sso_auth_core::AuthError;
use tonic::Status;

/// Map an [`AuthError`] to the status returned to the caller.
///
/// Internal failures are logged here in full and surface as a bare
/// `INTERNAL` with no detail.
pub fn auth_status(err: &AuthError) -> Status {
    match err {
        AuthError::MissingField { .. } | AuthError::UnknownApp(_) => {
            Status::invalid_argument(err.public_message())
        }
        AuthError::UserExists => Status::already_exists(err.public_message()),
        AuthError::InvalidCredentials | AuthError::InvalidToken | AuthError::TokenExpired => {
            Status::unauthenticated(err.public_message())
        }
        AuthError::Database(_)
        | AuthError::Signing(_)
        | AuthError::Configuration(_)
        | AuthError::Internal(_) => {
            tracing::error!(error = %err, code = err.error_code(), "request failed");
            Status::internal(err.public_message())
        }
    }
}
