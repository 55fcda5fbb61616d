//! Mock repositories for testing

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sso_db::{AppRepository, AppRow, CreateUser, DbError, DbResult, UserRepository, UserRow};
use sso_types::{AppId, UserId};

/// In-memory user repository for testing.
///
/// Uniqueness goes through the map's entry API, which locks the shard, the
/// same single-step guarantee the SQL unique index provides.
#[derive(Default, Clone)]
pub struct MockUserRepository {
    by_email: Arc<DashMap<String, UserRow>>,
    next_id: Arc<AtomicI64>,
    unavailable: Arc<AtomicBool>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    /// Stored hash for an email
    #[allow(dead_code)]
    pub fn stored_hash(&self, email: &str) -> Option<String> {
        self.by_email.get(email).map(|r| r.pass_hash.clone())
    }

    /// Make every subsequent call fail like an unavailable database
    #[allow(dead_code)]
    pub fn break_storage(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    fn check_storage(&self) -> DbResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "database unavailable",
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, user: CreateUser) -> DbResult<UserId> {
        self.check_storage()?;
        match self.by_email.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(DbError::AlreadyExists),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                slot.insert(UserRow {
                    id,
                    email: user.email,
                    pass_hash: user.pass_hash,
                });
                Ok(UserId(id))
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> DbResult<UserRow> {
        self.check_storage()?;
        self.by_email
            .get(email)
            .map(|r| r.value().clone())
            .ok_or(DbError::NotFound)
    }
}

/// In-memory application repository for testing
#[derive(Default, Clone)]
pub struct MockAppRepository {
    apps: Arc<DashMap<i32, AppRow>>,
    lookups: Arc<AtomicUsize>,
}

impl MockAppRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision an application directly
    pub fn insert_app(&self, id: i32, name: &str, secret: &str, token_ttl_secs: Option<i64>) {
        self.apps.insert(
            id,
            AppRow {
                id,
                name: name.to_string(),
                secret: secret.to_string(),
                token_ttl_secs,
            },
        );
    }

    /// How many times the backing store was queried
    #[allow(dead_code)]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AppRepository for MockAppRepository {
    async fn find_by_id(&self, id: AppId) -> DbResult<AppRow> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.apps
            .get(&id.get())
            .map(|r| r.value().clone())
            .ok_or(DbError::NotFound)
    }
}
