//! Request validation
//!
//! Each operation checks its fields in a fixed order and reports only the
//! first failure. The two orders differ: registration checks the email first,
//! login checks the password first.

use sso_types::AppId;

use crate::AuthError;

/// Validate a registration request
pub fn validate_register(email: &str, password: &str) -> Result<(), AuthError> {
    require(email, "email")?;
    require(password, "password")?;
    Ok(())
}

/// Validate a login request
pub fn validate_login(email: &str, password: &str, app_id: AppId) -> Result<(), AuthError> {
    require(password, "password")?;
    require(email, "email")?;
    if app_id.is_unset() {
        return Err(AuthError::missing("app_id"));
    }
    Ok(())
}

fn require(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.is_empty() {
        return Err(AuthError::missing(field));
    }
    Ok(())
}
