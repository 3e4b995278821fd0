use crate::utils::fingerprint::Fingerprint;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Server-side record backing a bearer session. The token alone is not
/// enough to authenticate: the record must still exist and agree with it.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub username: String,
    pub fingerprint: Fingerprint,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Option<SessionRecord>;
    async fn set(&self, user_id: &str, record: SessionRecord);
    async fn delete(&self, user_id: &str);

    /// Atomically checks the stored record against the caller's identity
    /// and, when everything agrees, extends it to `now + ttl` under the
    /// same lock. Returns the refreshed record, or `None` when the
    /// session is missing, expired or does not match.
    async fn refresh_if(
        &self,
        user_id: &str,
        username: &str,
        fingerprint: &Fingerprint,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<SessionRecord>;

    /// Removes expired records, returning how many were dropped.
    async fn sweep_expired(&self, now: DateTime<Utc>) -> usize;
}

#[derive(Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: &str) -> Option<SessionRecord> {
        let now = Utc::now();
        {
            let entries = self.entries.read().await;
            match entries.get(user_id) {
                Some(record) if !record.is_expired(now) => return Some(record.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: drop it so it does not linger until the next sweep.
        let mut entries = self.entries.write().await;
        if entries.get(user_id).is_some_and(|r| r.is_expired(now)) {
            entries.remove(user_id);
        }
        None
    }

    async fn set(&self, user_id: &str, record: SessionRecord) {
        let mut entries = self.entries.write().await;
        entries.insert(user_id.to_string(), record);
    }

    async fn delete(&self, user_id: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(user_id);
    }

    async fn refresh_if(
        &self,
        user_id: &str,
        username: &str,
        fingerprint: &Fingerprint,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<SessionRecord> {
        let mut entries = self.entries.write().await;
        let record = entries.get_mut(user_id)?;

        if record.is_expired(now)
            || record.username != username
            || !record.fingerprint.matches(fingerprint)
        {
            return None;
        }

        record.expires_at = now + ttl;
        Some(record.clone())
    }

    async fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, record| !record.is_expired(now));
        before - entries.len()
    }
}
