//! Per-session conversation state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use super::response::StructuredResponse;
use crate::types::ModelMessage;

/// Conversation state for one session id.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Ordered history as seen by the runtime.
    pub messages: Vec<ModelMessage>,
    /// Response produced by the most recent turn.
    pub latest_response: Option<StructuredResponse>,
}

/// Shared handle to a session; the lock is held for a whole agent turn.
pub type SessionHandle = Arc<tokio::sync::Mutex<Session>>;

/// Retention policy for [`SessionStore`]. The default keeps every session for
/// the life of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Evict the least recently used session once this many are stored.
    /// `Some(0)` behaves like `Some(1)`: the session being created is always kept.
    pub max_sessions: Option<usize>,
    /// Drop sessions not touched for this long.
    pub idle_ttl: Option<Duration>,
}

impl SessionPolicy {
    pub fn unbounded() -> Self {
        Self::default()
    }
}

#[derive(Debug)]
struct Entry {
    session: SessionHandle,
    last_access: Instant,
}

/// Maps session ids to sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Entry>>,
    policy: SessionPolicy,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: SessionPolicy) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            policy,
        }
    }

    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        // A panic while holding the map lock cannot leave an entry half-written.
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get or create a session by ID.
    ///
    /// Repeated calls with the same id return the same handle until the
    /// session is removed or evicted.
    pub fn get_or_create(&self, session_id: &str) -> SessionHandle {
        let now = Instant::now();
        let mut sessions = self.lock();

        if let Some(ttl) = self.policy.idle_ttl {
            let before = sessions.len();
            sessions.retain(|_, entry| now.duration_since(entry.last_access) < ttl);
            if sessions.len() != before {
                debug!(expired = before - sessions.len(), "expired idle sessions");
            }
        }

        if let Some(entry) = sessions.get_mut(session_id) {
            entry.last_access = now;
            return Arc::clone(&entry.session);
        }

        if let Some(max) = self.policy.max_sessions {
            let max = max.max(1);
            while sessions.len() >= max {
                let oldest = sessions
                    .iter()
                    .min_by_key(|(_, entry)| entry.last_access)
                    .map(|(id, _)| id.clone());
                let Some(oldest) = oldest else { break };
                debug!(session_id = %oldest, "evicting least recently used session");
                sessions.remove(&oldest);
            }
        }

        let session = SessionHandle::default();
        sessions.insert(
            session_id.to_string(),
            Entry {
                session: Arc::clone(&session),
                last_access: now,
            },
        );
        session
    }

    /// Get an existing session without creating or touching it.
    pub fn get(&self, session_id: &str) -> Option<SessionHandle> {
        self.lock()
            .get(session_id)
            .map(|entry| Arc::clone(&entry.session))
    }

    /// Remove a session.
    pub fn remove(&self, session_id: &str) -> Option<SessionHandle> {
        self.lock().remove(session_id).map(|entry| entry.session)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// List session IDs.
    pub fn session_ids(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unseen_id_yields_empty_session() {
        let store = SessionStore::new();

        let session = store.get_or_create("ctx-1");
        let session = session.lock().await;

        assert!(session.messages.is_empty());
        assert!(session.latest_response.is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn same_id_returns_same_handle() {
        let store = SessionStore::new();

        let first = store.get_or_create("ctx-1");
        let second = store.get_or_create("ctx-1");
        let other = store.get_or_create("ctx-2");

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
    }

    #[tokio::test]
    async fn mutations_are_visible_through_later_lookups() {
        let store = SessionStore::new();
        store
            .get_or_create("ctx-1")
            .lock()
            .await
            .messages
            .push(ModelMessage::user("hello"));

        let session = store.get_or_create("ctx-1");
        assert_eq!(session.lock().await.messages.len(), 1);
    }

    #[test]
    fn get_does_not_create() {
        let store = SessionStore::new();
        assert!(store.get("missing").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn remove_forgets_session() {
        let store = SessionStore::new();
        let first = store.get_or_create("ctx-1");

        assert!(store.remove("ctx-1").is_some());
        let second = store.get_or_create("ctx-1");

        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test(start_paused = true)]
    async fn capacity_evicts_least_recently_used() {
        let store = SessionStore::with_policy(SessionPolicy {
            max_sessions: Some(2),
            idle_ttl: None,
        });

        store.get_or_create("a");
        tokio::time::advance(Duration::from_secs(1)).await;
        store.get_or_create("b");
        tokio::time::advance(Duration::from_secs(1)).await;
        store.get_or_create("a");
        tokio::time::advance(Duration::from_secs(1)).await;
        store.get_or_create("c");

        let mut ids = store.session_ids();
        ids.sort();
        assert_eq!(ids, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn zero_capacity_keeps_only_newest_session() {
        let store = SessionStore::with_policy(SessionPolicy {
            max_sessions: Some(0),
            idle_ttl: None,
        });

        store.get_or_create("a");
        let b = store.get_or_create("b");

        assert_eq!(store.session_ids(), vec!["b".to_string()]);
        assert!(Arc::ptr_eq(&b, &store.get_or_create("b")));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_sessions_expire_after_ttl() {
        let store = SessionStore::with_policy(SessionPolicy {
            max_sessions: None,
            idle_ttl: Some(Duration::from_secs(60)),
        });
        let original = store.get_or_create("ctx-1");
        store.get_or_create("ctx-2");

        tokio::time::advance(Duration::from_secs(30)).await;
        store.get_or_create("ctx-2");
        tokio::time::advance(Duration::from_secs(45)).await;
        let renewed = store.get_or_create("ctx-1");

        assert!(!Arc::ptr_eq(&original, &renewed));
        assert!(store.get("ctx-2").is_some());
    }

    #[test]
    fn unbounded_policy_keeps_everything() {
        let store = SessionStore::new();
        for i in 0..100 {
            store.get_or_create(&format!("ctx-{i}"));
        }
        assert_eq!(store.len(), 100);
        assert_eq!(store.policy(), &SessionPolicy::unbounded());
    }
}
