//! Configuration for the Auth API service.

use std::str::FromStr;
use std::time::Duration;

use sso_auth_core::{AuthConfig, HashingConfig};

/// Auth API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// gRPC server port
    pub grpc_port: u16,

    /// SQLite URL or database file path
    pub database_url: String,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Auth core configuration
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Database
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let db_max_connections: u32 = parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid("DB_MAX_CONNECTIONS"));
        }

        // Server port
        let grpc_port = parse_or(&lookup, "GRPC_PORT", 44044)?;

        // Token lifetime for apps without their own (default 1 hour)
        let token_ttl_secs: u64 = parse_or(&lookup, "TOKEN_TTL_SECS", 3600)?;
        if token_ttl_secs == 0 {
            return Err(ConfigError::Invalid("TOKEN_TTL_SECS"));
        }

        let app_cache_ttl_secs: u64 = parse_or(&lookup, "APP_CACHE_TTL_SECS", 300)?;

        // Password hashing
        let defaults = HashingConfig::default();
        let hashing = HashingConfig {
            memory_kib: parse_or(&lookup, "ARGON2_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(&lookup, "ARGON2_ITERATIONS", defaults.iterations)?,
            parallelism: defaults.parallelism,
            max_concurrency: parse_or(&lookup, "HASH_CONCURRENCY", defaults.max_concurrency)?,
        };
        if hashing.max_concurrency == 0 {
            return Err(ConfigError::Invalid("HASH_CONCURRENCY"));
        }

        let auth = AuthConfig::new(Duration::from_secs(token_ttl_secs))
            .with_app_cache_ttl(Duration::from_secs(app_cache_ttl_secs))
            .with_hashing(hashing);

        Ok(Self {
            grpc_port,
            database_url,
            db_max_connections,
            auth,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "sqlite://storage/sso.db")]).unwrap();
        assert_eq!(config.grpc_port, 44044);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.auth.default_token_ttl, Duration::from_secs(3600));
        assert_eq!(config.auth.app_cache_ttl, Duration::from_secs(300));
        assert_eq!(config.auth.hashing, HashingConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "./sso.db"),
            ("GRPC_PORT", "50051"),
            ("TOKEN_TTL_SECS", "900"),
            ("ARGON2_MEMORY_KIB", "65536"),
            ("ARGON2_ITERATIONS", "3"),
            ("HASH_CONCURRENCY", "2"),
        ])
        .unwrap();
        assert_eq!(config.grpc_port, 50051);
        assert_eq!(config.auth.default_token_ttl, Duration::from_secs(900));
        assert_eq!(config.auth.hashing.memory_kib, 65536);
        assert_eq!(config.auth.hashing.iterations, 3);
        assert_eq!(config.auth.hashing.max_concurrency, 2);
    }

    #[test]
    fn test_database_url_required() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing("DATABASE_URL"))));
        assert!(matches!(
            load(&[("DATABASE_URL", "")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("DATABASE_URL", "x.db"), ("GRPC_PORT", "not-a-port")]),
            Err(ConfigError::Invalid("GRPC_PORT"))
        ));
        assert!(matches!(
            load(&[("DATABASE_URL", "x.db"), ("TOKEN_TTL_SECS", "0")]),
            Err(ConfigError::Invalid("TOKEN_TTL_SECS"))
        ));
        assert!(matches!(
            load(&[("DATABASE_URL", "x.db"), ("HASH_CONCURRENCY", "0")]),
            Err(ConfigError::Invalid("HASH_CONCURRENCY"))
        ));
    }
}
