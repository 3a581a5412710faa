//! In-memory [`SessionStore`] backed by a [`DashMap`].
//!
//! Entries expire after `ttl` without a read or write. A stale entry is
//! dropped when it is next looked up. Inserting a new session also sweeps
//! the whole map with [`prune`], at most once per `ttl`, so abandoned
//! sessions do not accumulate.
//!
//! [`prune`]: InMemorySessionStore::prune

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;

use lexchat_core::chat::log::ConversationLog;
use lexchat_core::session::store::SessionStore;
use lexchat_types::chat::SessionId;
use lexchat_types::error::StoreError;

struct Entry {
    log: ConversationLog,
    touched: Instant,
}

/// Process-local session storage. Lost on restart.
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, Entry>,
    ttl: Option<Duration>,
    created: Instant,
    /// Milliseconds after `created` of the last sweep.
    last_sweep_ms: AtomicU64,
}

impl InMemorySessionStore {
    /// Create a store. `None` keeps sessions for the life of the process.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
            created: Instant::now(),
            last_sweep_ms: AtomicU64::new(0),
        }
    }

    /// Build from a TTL in seconds, where `0` disables expiry.
    pub fn with_ttl_secs(secs: u64) -> Self {
        Self::new((secs > 0).then(|| Duration::from_secs(secs)))
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        self.ttl
            .is_some_and(|ttl| now.duration_since(entry.touched) >= ttl)
    }

    /// Drop every expired session. Returns how many were removed.
    pub fn prune(&self) -> usize {
        let now = Instant::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| !self.is_expired(entry, now));
        before.saturating_sub(self.sessions.len())
    }

    /// Sweep if a full `ttl` has passed since the previous sweep.
    fn maybe_prune(&self) {
        let Some(ttl) = self.ttl else {
            return;
        };
        let now_ms = self.created.elapsed().as_millis() as u64;
        let last = self.last_sweep_ms.load(Ordering::Relaxed);
        if now_ms.saturating_sub(last) < ttl.as_millis() as u64 {
            return;
        }
        // Only one caller wins the sweep for this interval.
        if self
            .last_sweep_ms
            .compare_exchange(last, now_ms, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            let removed = self.prune();
            if removed > 0 {
                tracing::debug!(removed, "pruned expired sessions");
            }
        }
    }

    /// Number of stored sessions, including any not yet pruned.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &SessionId) -> Result<Option<ConversationLog>, StoreError> {
        let now = Instant::now();
        if let Some(mut entry) = self.sessions.get_mut(id) {
            if !self.is_expired(&entry, now) {
                entry.touched = now;
                return Ok(Some(entry.log.clone()));
            }
        }
        // Either absent or stale; the guard above is released before removal.
        if self
            .sessions
            .remove_if(id, |_, entry| self.is_expired(entry, now))
            .is_some()
        {
            tracing::debug!(session_id = %id, "session expired");
        }
        Ok(None)
    }

    async fn put(&self, id: &SessionId, log: &ConversationLog) -> Result<(), StoreError> {
        let previous = self.sessions.insert(
            id.clone(),
            Entry {
                log: log.clone(),
                touched: Instant::now(),
            },
        );
        if previous.is_none() {
            self.maybe_prune();
        }
        Ok(())
    }

    async fn remove(&self, id: &SessionId) -> Result<(), StoreError> {
        self.sessions.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(greeting: &str) -> ConversationLog {
        ConversationLog::seeded(greeting)
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemorySessionStore::default();
        let id = SessionId::from("a");
        assert!(store.get(&id).await.unwrap().is_none());

        store.put(&id, &log("hi")).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap(), Some(log("hi")));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_put_replaces() {
        let store = InMemorySessionStore::default();
        let id = SessionId::from("a");
        store.put(&id, &log("first")).await.unwrap();
        store.put(&id, &log("second")).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap(), Some(log("second")));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = InMemorySessionStore::default();
        store.put(&SessionId::from("a"), &log("for a")).await.unwrap();
        store.put(&SessionId::from("b"), &log("for b")).await.unwrap();

        store.remove(&SessionId::from("a")).await.unwrap();
        assert!(store.get(&SessionId::from("a")).await.unwrap().is_none());
        assert_eq!(
            store.get(&SessionId::from("b")).await.unwrap(),
            Some(log("for b"))
        );
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped_on_read() {
        let store = InMemorySessionStore::new(Some(Duration::from_millis(20)));
        let id = SessionId::from("a");
        store.put(&id, &log("hi")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(store.get(&id).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_prune() {
        let store = InMemorySessionStore::new(Some(Duration::from_millis(20)));
        store.put(&SessionId::from("old"), &log("x")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        store.put(&SessionId::from("fresh"), &log("y")).await.unwrap();

        assert_eq!(store.prune(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(&SessionId::from("fresh")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_abandoned_sessions_are_swept_on_insert() {
        let store = InMemorySessionStore::new(Some(Duration::from_millis(5)));
        for i in 0..1000 {
            store
                .put(&SessionId::from(format!("old-{i}").as_str()), &log("x"))
                .await
                .unwrap();
        }
        tokio::time::sleep(Duration::from_millis(30)).await;

        for i in 0..10 {
            store
                .put(&SessionId::from(format!("new-{i}").as_str()), &log("y"))
                .await
                .unwrap();
        }
        assert!(store.len() <= 10, "len = {}", store.len());
        assert!(store.get(&SessionId::from("new-9")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_expiry() {
        let store = InMemorySessionStore::with_ttl_secs(0);
        store.put(&SessionId::from("a"), &log("x")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(store.prune(), 0);
        assert!(store.get(&SessionId::from("a")).await.unwrap().is_some());
    }
}
