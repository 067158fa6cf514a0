// Integration tests for the live streaming endpoint: a real server bound to
// an ephemeral port, real WebSocket clients, and a scripted engine. These
// exercise the whole per-connection pipeline: frame in, recognition,
// transcript append, fan-out, unsubscribe on disconnect.

use futures::{SinkExt, StreamExt};
use meeting_relay::{
    create_router, AppState, Recognition, RecognitionAdapter, RecognitionEngine, RecognitionError,
    TranscriptionEvent,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_tungstenite::tungstenite::Message;

type WsClient =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// Engine that recognizes the frame's bytes as UTF-8 text. Empty frames are
/// the no-speech sentinel; the b"boom" frame simulates an unreachable engine.
struct EchoEngine;

impl RecognitionEngine for EchoEngine {
    fn recognize(&self, audio: &[u8]) -> Result<Recognition, RecognitionError> {
        if audio.is_empty() {
            return Ok(Recognition::empty());
        }
        if audio == b"boom" {
            return Err(RecognitionError::Engine {
                message: "engine unreachable".to_string(),
            });
        }
        Ok(Recognition {
            text: String::from_utf8_lossy(audio).into_owned(),
            speaker: None,
            timestamp: 42.0,
        })
    }

    fn name(&self) -> &str {
        "echo"
    }
}

async fn spawn_app() -> (String, AppState) {
    let state = AppState::new(RecognitionAdapter::new(Arc::new(EchoEngine)));
    let router = create_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("ws://{}", addr), state)
}

async fn connect(base: &str, session_id: &str) -> WsClient {
    let url = format!("{}/ws/record/{}", base, session_id);
    let (socket, _response) = tokio_tungstenite::connect_async(url).await.unwrap();
    socket
}

async fn next_event(socket: &mut WsClient) -> TranscriptionEvent {
    loop {
        match tokio::time::timeout(Duration::from_secs(5), socket.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => return serde_json::from_str(&text).unwrap(),
            Ok(Some(Ok(_))) => continue,
            other => panic!("Expected a transcription event, got {:?}", other),
        }
    }
}

async fn assert_silent(socket: &mut WsClient) {
    let res = tokio::time::timeout(Duration::from_millis(200), socket.next()).await;
    assert!(res.is_err(), "Expected no delivery, got {:?}", res);
}

async fn wait_for_group_size(state: &AppState, session_id: &str, expected: usize) {
    for _ in 0..250 {
        if state.registry.group_size(session_id).await == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!(
        "Group size for {} never reached {}",
        session_id, expected
    );
}

#[tokio::test]
async fn test_frame_is_appended_and_fanned_out() {
    let (base, state) = spawn_app().await;

    let mut a = connect(&base, "meeting-1").await;
    let mut b = connect(&base, "meeting-1").await;
    wait_for_group_size(&state, "meeting-1", 2).await;

    a.send(Message::Binary(b"hello".to_vec())).await.unwrap();

    // Both subscribers receive the event, sender included.
    let event_a = next_event(&mut a).await;
    let event_b = next_event(&mut b).await;
    assert_eq!(event_a.text, "hello");
    assert_eq!(event_a.speaker, "Unknown");
    assert_eq!(event_b, event_a);

    // The event also landed in the transcript.
    let snapshot = state.store.snapshot("meeting-1").await.unwrap();
    assert_eq!(snapshot.transcriptions.len(), 1);
    assert_eq!(snapshot.transcriptions[0].text, "hello");
}

#[tokio::test]
async fn test_connect_creates_unknown_session() {
    let (base, state) = spawn_app().await;
    assert!(!state.store.contains("implicit-1").await);

    let _a = connect(&base, "implicit-1").await;
    wait_for_group_size(&state, "implicit-1", 1).await;

    assert!(state.store.contains("implicit-1").await);
}

#[tokio::test]
async fn test_empty_recognition_is_discarded() {
    let (base, state) = spawn_app().await;

    let mut a = connect(&base, "meeting-1").await;
    let mut b = connect(&base, "meeting-1").await;
    wait_for_group_size(&state, "meeting-1", 2).await;

    // An empty frame produces the no-speech sentinel; the frame after it
    // proves the empty one was skipped without ever being appended or
    // broadcast.
    a.send(Message::Binary(Vec::new())).await.unwrap();
    a.send(Message::Binary(b"after".to_vec())).await.unwrap();

    assert_eq!(next_event(&mut a).await.text, "after");
    assert_eq!(next_event(&mut b).await.text, "after");

    let snapshot = state.store.snapshot("meeting-1").await.unwrap();
    assert_eq!(snapshot.transcriptions.len(), 1);
    assert_eq!(snapshot.transcriptions[0].text, "after");
}

#[tokio::test]
async fn test_recognition_failure_keeps_connection_alive() {
    let (base, state) = spawn_app().await;

    let mut a = connect(&base, "meeting-1").await;
    wait_for_group_size(&state, "meeting-1", 1).await;

    a.send(Message::Binary(b"boom".to_vec())).await.unwrap();
    a.send(Message::Binary(b"recovered".to_vec())).await.unwrap();

    assert_eq!(next_event(&mut a).await.text, "recovered");

    let snapshot = state.store.snapshot("meeting-1").await.unwrap();
    assert_eq!(snapshot.transcriptions.len(), 1);
}

#[tokio::test]
async fn test_other_session_receives_nothing() {
    let (base, state) = spawn_app().await;

    let mut a = connect(&base, "meeting-1").await;
    let mut other = connect(&base, "meeting-2").await;
    wait_for_group_size(&state, "meeting-1", 1).await;
    wait_for_group_size(&state, "meeting-2", 1).await;

    a.send(Message::Binary(b"hello".to_vec())).await.unwrap();

    assert_eq!(next_event(&mut a).await.text, "hello");
    assert_silent(&mut other).await;
    assert!(state
        .store
        .snapshot("meeting-2")
        .await
        .unwrap()
        .transcriptions
        .is_empty());
}

#[tokio::test]
async fn test_disconnect_removes_connection_from_group() {
    let (base, state) = spawn_app().await;

    let mut a = connect(&base, "meeting-1").await;
    let mut b = connect(&base, "meeting-1").await;
    wait_for_group_size(&state, "meeting-1", 2).await;

    a.close(None).await.unwrap();
    wait_for_group_size(&state, "meeting-1", 1).await;

    // The survivor still gets events after the peer is gone.
    b.send(Message::Binary(b"still here".to_vec())).await.unwrap();
    assert_eq!(next_event(&mut b).await.text, "still here");

    b.close(None).await.unwrap();
    wait_for_group_size(&state, "meeting-1", 0).await;

    // With the group empty, publishes reach no one.
    assert_eq!(state.registry.publish("meeting-1", "anyone?").await, 0);
}
