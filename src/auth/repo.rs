use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::auth::repo_types::{NewUser, User};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
}

/// Credential store. Records are create-only and live as long as the store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by exact (case-sensitive) email.
    async fn find_by_email(&self, email: &str) -> Option<User>;

    async fn find_by_id(&self, id: u64) -> Option<User>;

    /// Atomically check email uniqueness and append the record.
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError>;

    async fn count(&self) -> usize;
}

#[derive(Default)]
struct Users {
    records: Vec<User>,
    last_id: u64,
}

impl Users {
    // Millisecond clock, bumped past the previous id when it has not advanced.
    fn next_id(&mut self, now: OffsetDateTime) -> u64 {
        let millis = u64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(0);
        let id = millis.max(self.last_id + 1);
        self.last_id = id;
        id
    }
}

/// Process-lifetime store backed by a vector under a single lock.
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Users>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Option<User> {
        let users = self.inner.read().await;
        users.records.iter().find(|u| u.email == email).cloned()
    }

    async fn find_by_id(&self, id: u64) -> Option<User> {
        let users = self.inner.read().await;
        users.records.iter().find(|u| u.id == id).cloned()
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.inner.write().await;
        if users.records.iter().any(|u| u.email == new_user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = OffsetDateTime::now_utc();
        let user = User {
            id: users.next_id(now),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
        };
        users.records.push(user.clone());
        Ok(user)
    }

    async fn count(&self) -> usize {
        self.inner.read().await.records.len()
    }
}
