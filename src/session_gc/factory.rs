//! Session creation and reuse bookkeeping.
//!
//! The factory keeps its own index of live session ids, mirroring the store.
//! The two are kept in sync by explicit calls: the factory registers ids it
//! mints, and the garbage collector tells it to forget an id when the session
//! is evicted.

use crate::session_gc::session::Session;
use crate::session_gc::store::SessionStore;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Factory owning the live-session id index.
#[derive(Default)]
pub struct SessionFactory {
    index: Mutex<HashSet<String>>,
}

impl SessionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a new session, registers its id, and puts it into the store.
    pub async fn create_session(&self, store: &SessionStore) -> Arc<Session> {
        let session = Arc::new(Session::new(uuid::Uuid::new_v4().to_string()));
        self.register(session.id()).await;
        store.put(session.clone()).await;
        session
    }

    /// Records an id as live. Used for factory-minted sessions and for
    /// sessions re-registered from disk at daemon startup.
    pub async fn register(&self, id: &str) {
        self.index.lock().await.insert(id.to_string());
    }

    /// Forgets a session id.
    ///
    /// Idempotent and never an error for unknown ids: concurrent eviction
    /// paths may both try to forget the same session.
    pub async fn remove_by_session_id(&self, id: &str) {
        self.index.lock().await.remove(id);
    }

    /// Whether the factory currently tracks the id as live.
    pub async fn contains(&self, id: &str) -> bool {
        self.index.lock().await.contains(id)
    }

    /// Number of ids currently tracked as live.
    pub async fn len(&self) -> usize {
        self.index.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.index.lock().await.is_empty()
    }
}
