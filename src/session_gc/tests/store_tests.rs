//! Tests for the concurrent session store.

use crate::session_gc::session::Session;
use crate::session_gc::store::SessionStore;
use std::sync::Arc;

#[tokio::test]
async fn test_put_and_get() {
    let store = SessionStore::new();
    store.put(Arc::new(Session::new("session-1"))).await;

    let session = store.get("session-1").await.unwrap();
    assert_eq!(session.id(), "session-1");
    assert!(store.get("session-2").await.is_none());
}

#[tokio::test]
async fn test_put_replaces_existing_entry() {
    let store = SessionStore::new();
    store.put(Arc::new(Session::restored("session-1", 100))).await;
    store.put(Arc::new(Session::restored("session-1", 200))).await;

    assert_eq!(store.len().await, 1);
    assert_eq!(store.get("session-1").await.unwrap().last_activity(), 200);
}

#[tokio::test]
async fn test_remove_reports_whether_something_was_removed() {
    let store = SessionStore::new();
    store.put(Arc::new(Session::new("session-1"))).await;

    assert!(store.remove("session-1").await);
    // Removing an absent id is a no-op, not an error.
    assert!(!store.remove("session-1").await);
    assert!(!store.remove("never-existed").await);
}

#[tokio::test]
async fn test_snapshot_is_point_in_time() {
    let store = SessionStore::new();
    store.put(Arc::new(Session::new("session-1"))).await;
    store.put(Arc::new(Session::new("session-2"))).await;

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.len(), 2);

    // Entries added after the snapshot call don't appear in it.
    store.put(Arc::new(Session::new("session-3"))).await;
    assert_eq!(snapshot.len(), 2);
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn test_len_and_is_empty() {
    let store = SessionStore::new();
    assert!(store.is_empty().await);
    assert_eq!(store.len().await, 0);

    store.put(Arc::new(Session::new("session-1"))).await;
    assert!(!store.is_empty().await);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_concurrent_puts_and_removes() {
    let store = Arc::new(SessionStore::new());

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let id = format!("session-{}", i);
            store.put(Arc::new(Session::new(id.clone()))).await;
            if let Some(session) = store.get(&id).await {
                session.touch();
            }
            store.remove(&id).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }
    assert!(store.is_empty().await);
}
