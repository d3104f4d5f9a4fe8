use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::UserId;

/// Errors from the cooldown store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cooldown store unavailable: {0}")]
    Unavailable(String),
}

/// Trait for the per-user "last successful generation" record.
///
/// Callers treat check errors as fail-open and update errors as
/// best-effort; implementations only report what happened.
#[async_trait]
pub trait CooldownStore: Send + Sync {
    /// Timestamp of the user's last successful generation, if any.
    async fn last_generation(&self, user: &UserId) -> Result<Option<DateTime<Utc>>, StoreError>;

    /// Record a successful generation, overwriting any previous timestamp.
    async fn record_generation(&self, user: &UserId, at: DateTime<Utc>) -> Result<(), StoreError>;
}

/// In-memory cooldown storage.
pub struct InMemoryCooldownStore {
    entries: RwLock<HashMap<UserId, DateTime<Utc>>>,
}

impl InMemoryCooldownStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCooldownStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CooldownStore for InMemoryCooldownStore {
    async fn last_generation(&self, user: &UserId) -> Result<Option<DateTime<Utc>>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.get(user).copied())
    }

    async fn record_generation(&self, user: &UserId, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(user.clone(), at);
        Ok(())
    }
}
