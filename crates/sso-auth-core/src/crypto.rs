//! Password hashing
//!
//! Argon2id hashing and verification run on the blocking pool behind a
//! semaphore, so a burst of logins cannot starve the async workers and the
//! number of concurrent hashes is bounded independently of RPC concurrency.

use std::sync::Arc;

use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use tokio::sync::{OnceCell, Semaphore};

use crate::{AuthError, HashingConfig};

/// Input hashed once to produce the decoy used for unknown emails
const DECOY_PASSWORD: &str = "decoy password for unknown accounts";

/// Argon2id hasher with fixed process-wide parameters.
///
/// Cloning is cheap and clones share the same hashing pool.
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
    limiter: Arc<Semaphore>,
    decoy_hash: Arc<OnceCell<String>>,
}

impl Argon2Hasher {
    /// Create a hasher from configuration.
    ///
    /// # Errors
    /// Returns [`AuthError::Configuration`] if the Argon2 parameters are out of
    /// range or the pool size is zero.
    pub fn new(config: &HashingConfig) -> Result<Self, AuthError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| AuthError::Configuration(format!("invalid argon2 parameters: {e}")))?;

        if config.max_concurrency == 0 {
            return Err(AuthError::Configuration(
                "hashing concurrency must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            params,
            limiter: Arc::new(Semaphore::new(config.max_concurrency)),
            decoy_hash: Arc::new(OnceCell::new()),
        })
    }

    /// Hash a password into a PHC string with a fresh random salt
    pub async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_owned();
        let argon2 = self.argon2();

        self.run_blocking(move || {
            let salt = SaltString::generate(&mut rand::thread_rng());
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| AuthError::Internal(format!("password hashing failed: {e}")))
        })
        .await
    }

    /// Check a password against a stored PHC string.
    ///
    /// Parameters are read from the hash itself, so hashes created under
    /// older settings still verify. The digest comparison is constant-time.
    pub async fn verify(&self, password: &str, pass_hash: &str) -> Result<bool, AuthError> {
        let password = password.to_owned();
        let pass_hash = pass_hash.to_owned();
        let argon2 = self.argon2();

        self.run_blocking(move || {
            let parsed = PasswordHash::new(&pass_hash)
                .map_err(|e| AuthError::Internal(format!("stored password hash is malformed: {e}")))?;

            match argon2.verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(e) => Err(AuthError::Internal(format!(
                    "password verification failed: {e}"
                ))),
            }
        })
        .await
    }

    /// Spend the same work as a real verification against a decoy hash.
    ///
    /// Used when the email is unknown so response time does not reveal
    /// whether an account exists.
    pub async fn verify_decoy(&self, password: &str) -> Result<(), AuthError> {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.hash(DECOY_PASSWORD))
            .await?;
        self.verify(password, decoy).await.map(|_| ())
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    async fn run_blocking<T, F>(&self, f: F) -> Result<T, AuthError>
    where
        F: FnOnce() -> Result<T, AuthError> + Send + 'static,
        T: Send + 'static,
    {
        // The permit moves into the blocking task so a cancelled caller
        // cannot free the slot while the hash is still running.
        let permit = Arc::clone(&self.limiter)
            .acquire_owned()
            .await
            .map_err(|_| AuthError::Internal("hashing pool closed".to_string()))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            f()
        })
        .await
        .map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))?
    }
}

impl std::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .field("available_permits", &self.limiter.available_permits())
            .finish()
    }
}
