//! Common test utilities for sso-auth-core integration tests

pub mod mock_repos;

use std::sync::Arc;
use std::time::Duration;

use sso_auth_core::{AuthConfig, AuthService, HashingConfig};

#[allow(unused_imports)]
pub use mock_repos::{MockAppRepository, MockUserRepository};

pub const APP_ID: i32 = 10;
pub const APP_SECRET: &str = "test-secret";
pub const APP_TTL: Duration = Duration::from_secs(15 * 60);
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

pub type TestAuthService = AuthService<MockUserRepository, MockAppRepository>;

/// Cheap Argon2 parameters; production defaults are far too slow for tests
pub fn fast_hashing() -> HashingConfig {
    HashingConfig {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
        max_concurrency: 4,
    }
}

/// Service over fresh mock repositories with app `APP_ID` provisioned
#[allow(dead_code)]
pub fn test_service() -> (TestAuthService, MockUserRepository, MockAppRepository) {
    let users = MockUserRepository::new();
    let apps = MockAppRepository::new();
    apps.insert_app(APP_ID, "test", APP_SECRET, Some(APP_TTL.as_secs() as i64));

    let config = AuthConfig::new(DEFAULT_TTL).with_hashing(fast_hashing());
    let service =
        AuthService::new(config, Arc::new(users.clone()), Arc::new(apps.clone())).unwrap();

    (service, users, apps)
}
