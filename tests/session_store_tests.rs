// Unit tests for the session store.
//
// These verify session lifecycle, NotFound handling, and that concurrent
// appends from many tasks never lose or duplicate events.

use meeting_relay::{SessionStore, StoreError, TranscriptionEvent};

fn event(text: &str, timestamp: f64) -> TranscriptionEvent {
    TranscriptionEvent {
        text: text.to_string(),
        speaker: "Unknown".to_string(),
        timestamp,
    }
}

#[tokio::test]
async fn test_create_then_snapshot_empty() {
    let store = SessionStore::new();
    store.create("meeting-1").await;

    let snapshot = store.snapshot("meeting-1").await.unwrap();
    assert!(snapshot.transcriptions.is_empty());
    assert!(snapshot.duration >= 0.0);
    assert!(snapshot.start_time > 0.0);
}

#[tokio::test]
async fn test_contains_tracks_creation() {
    let store = SessionStore::new();
    assert!(!store.contains("meeting-1").await);

    store.create("meeting-1").await;
    assert!(store.contains("meeting-1").await);
}

#[tokio::test]
async fn test_create_is_idempotent() {
    let store = SessionStore::new();
    store.create("meeting-1").await;
    store
        .append("meeting-1", event("hello", 1.0))
        .await
        .unwrap();

    // A second create must not reset the transcript or the start time.
    let before = store.snapshot("meeting-1").await.unwrap();
    store.create("meeting-1").await;
    let after = store.snapshot("meeting-1").await.unwrap();

    assert_eq!(after.transcriptions.len(), 1);
    assert_eq!(after.start_time, before.start_time);
}

#[tokio::test]
async fn test_append_unknown_session_fails() {
    let store = SessionStore::new();

    let result = store.append("nope", event("hello", 1.0)).await;
    assert_eq!(result, Err(StoreError::NotFound("nope".to_string())));
}

#[tokio::test]
async fn test_snapshot_unknown_session_fails() {
    let store = SessionStore::new();
    assert!(matches!(
        store.snapshot("nope").await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_append_preserves_order() {
    let store = SessionStore::new();
    store.create("meeting-1").await;

    for i in 0..10 {
        store
            .append("meeting-1", event(&format!("line {}", i), i as f64))
            .await
            .unwrap();
    }

    let snapshot = store.snapshot("meeting-1").await.unwrap();
    let texts: Vec<&str> = snapshot
        .transcriptions
        .iter()
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(texts[0], "line 0");
    assert_eq!(texts[9], "line 9");
}

#[tokio::test]
async fn test_concurrent_appends_lose_nothing() {
    const TASKS: usize = 8;
    const EVENTS_PER_TASK: usize = 50;

    let store = SessionStore::new();
    store.create("meeting-1").await;

    let mut handles = Vec::new();
    for task in 0..TASKS {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..EVENTS_PER_TASK {
                store
                    .append("meeting-1", event(&format!("t{}-{}", task, i), i as f64))
                    .await
                    .unwrap();
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    let snapshot = store.snapshot("meeting-1").await.unwrap();
    assert_eq!(
        snapshot.transcriptions.len(),
        TASKS * EVENTS_PER_TASK,
        "Every append must land exactly once"
    );
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let store = SessionStore::new();
    store.create("a").await;
    store.create("b").await;

    store.append("a", event("only in a", 1.0)).await.unwrap();

    assert_eq!(store.snapshot("a").await.unwrap().transcriptions.len(), 1);
    assert!(store.snapshot("b").await.unwrap().transcriptions.is_empty());
}
