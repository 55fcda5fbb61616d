//! Configuration types for auth service

use std::time::Duration;

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token lifetime for applications that do not carry their own
    pub default_token_ttl: Duration,
    /// How long a resolved application stays in the registry cache
    pub app_cache_ttl: Duration,
    /// Maximum number of cached applications
    pub app_cache_capacity: u64,
    /// Password hashing parameters
    pub hashing: HashingConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            default_token_ttl: Duration::from_secs(60 * 60), // 1 hour
            app_cache_ttl: Duration::from_secs(5 * 60),
            app_cache_capacity: 1_000,
            hashing: HashingConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Create a config with the given fallback token lifetime
    pub fn new(default_token_ttl: Duration) -> Self {
        Self {
            default_token_ttl,
            ..Self::default()
        }
    }

    /// Set the application cache duration
    pub fn with_app_cache_ttl(mut self, ttl: Duration) -> Self {
        self.app_cache_ttl = ttl;
        self
    }

    /// Set password hashing parameters
    pub fn with_hashing(mut self, hashing: HashingConfig) -> Self {
        self.hashing = hashing;
        self
    }
}

/// Argon2id parameters plus the size of the hashing pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashingConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Lanes per hash
    pub parallelism: u32,
    /// Hashes allowed to run at once, independent of RPC concurrency
    pub max_concurrency: usize,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
            max_concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

impl HashingConfig {
    /// Set the memory cost
    pub fn with_memory_kib(mut self, memory_kib: u32) -> Self {
        self.memory_kib = memory_kib;
        self
    }

    /// Set the number of passes
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the hashing pool size
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}
