//! Concurrent in-memory session store.
//!
//! The store is the single shared map between request-handling tasks
//! (creation, lookup) and the garbage collector (removal). All mutation is
//! internally synchronized; callers never need external locking. Critical
//! sections are limited to single map operations, so the collector never
//! holds the map across a whole sweep.

use crate::session_gc::session::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Concurrent id -> session map.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Arc<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a session by id.
    pub async fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.lock().await.get(id).cloned()
    }

    /// Inserts or replaces a session under its own id.
    pub async fn put(&self, session: Arc<Session>) {
        self.sessions
            .lock()
            .await
            .insert(session.id().to_string(), session);
    }

    /// Removes a session by id.
    ///
    /// Idempotent: removing an absent id is a no-op. Returns whether an
    /// entry was actually removed, so racing eviction paths can tell who won.
    pub async fn remove(&self, id: &str) -> bool {
        self.sessions.lock().await.remove(id).is_some()
    }

    /// Returns a point-in-time copy of all current sessions.
    ///
    /// The lock is held only for the duration of the clone; sessions added
    /// after the call returns are not part of the snapshot and get evaluated
    /// on the next sweep.
    pub async fn snapshot(&self) -> Vec<Arc<Session>> {
        self.sessions.lock().await.values().cloned().collect()
    }

    /// Number of sessions currently in the store.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}
