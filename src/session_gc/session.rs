//! The server-side session entity.
//!
//! A `Session` is shared between request-handling tasks (which refresh the
//! activity timestamp) and the garbage collector (which destroys expired
//! sessions), so all mutable state lives in atomics. Lifecycle is monotonic:
//! once destroyed, a session never becomes active again.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Destroyed,
}

/// A single server-side session: identity, activity timestamp, lifecycle.
#[derive(Debug)]
pub struct Session {
    /// Unique id, immutable after creation.
    id: String,
    /// Creation time (epoch seconds).
    created_at: i64,
    /// Last-activity timestamp (epoch seconds), refreshed by request tasks.
    last_activity: AtomicI64,
    /// Set exactly once, by whichever destroy call wins.
    destroyed: AtomicBool,
}

impl Session {
    /// Creates a fresh session with the activity timestamp set to now.
    pub fn new(id: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self::restored(id, now)
    }

    /// Creates a session with an explicit last-activity timestamp.
    ///
    /// Used when re-registering sessions found on disk at daemon startup,
    /// where the file mtime stands in for the last activity.
    pub fn restored(id: impl Into<String>, last_activity: i64) -> Self {
        Self {
            id: id.into(),
            created_at: chrono::Utc::now().timestamp(),
            last_activity: AtomicI64::new(last_activity),
            destroyed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Last-activity timestamp in epoch seconds.
    pub fn last_activity(&self) -> i64 {
        self.last_activity.load(Ordering::SeqCst)
    }

    /// Refreshes the activity timestamp. Called by request-handling tasks
    /// whenever the session is touched.
    pub fn touch(&self) {
        self.last_activity
            .store(chrono::Utc::now().timestamp(), Ordering::SeqCst);
    }

    pub fn state(&self) -> SessionState {
        if self.destroyed.load(Ordering::SeqCst) {
            SessionState::Destroyed
        } else {
            SessionState::Active
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// Destroys the session, recording a human-readable reason.
    ///
    /// Idempotent: only the first call logs and transitions the state; later
    /// calls are no-ops and their reason strings are discarded.
    pub fn destroy(&self, reason: &str) {
        if self
            .destroyed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            tracing::info!(session_id = %self.id, "session destroyed: {}", reason);
        }
    }
}
