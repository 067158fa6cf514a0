use super::state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tracing::{debug, error, info, warn};

use crate::session::TranscriptionEvent;

/// GET /ws/record/:session_id
/// Upgrade to a bidirectional audio stream for a session
pub async fn record_stream(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_connection(socket, state, session_id))
}

/// Per-connection loop: binary audio frames in, serialized transcription
/// events out. Frames are processed strictly sequentially, so one connection
/// has at most one recognition call in flight and its own events keep their
/// completion order.
async fn handle_connection(socket: WebSocket, state: AppState, session_id: String) {
    // Session must exist before the connection joins a broadcast group.
    state.store.create(&session_id).await;
    let (conn_id, mut events_rx) = state.registry.subscribe(&session_id).await;

    info!("Connection {:?} active on session {}", conn_id, session_id);

    let (mut sink, mut stream) = socket.split();

    // Drain broadcast events into the socket. Ends when the registry drops
    // our sender (unsubscribe) or the peer goes away.
    let forward_task = tokio::spawn(async move {
        while let Some(event_json) = events_rx.recv().await {
            if sink.send(Message::Text(event_json)).await.is_err() {
                break;
            }
        }
    });

    while let Some(message) = stream.next().await {
        let frame = match message {
            Ok(Message::Binary(frame)) => frame,
            Ok(Message::Close(_)) => break,
            // Pings are answered by axum; other text/pong traffic is ignored.
            Ok(_) => continue,
            Err(e) => {
                debug!("Connection {:?} transport error: {}", conn_id, e);
                break;
            }
        };

        let recognition = match state.recognizer.recognize(frame).await {
            Ok(r) => r,
            Err(e) => {
                // A failed frame never tears the connection down.
                warn!("Recognition failed on session {}: {}", session_id, e);
                continue;
            }
        };

        if recognition.is_empty() {
            continue;
        }

        let event = TranscriptionEvent {
            text: recognition.text.clone(),
            speaker: recognition.speaker_or_unknown(),
            timestamp: recognition.timestamp,
        };

        // Append before publish: the store is the order of record, the
        // broadcast mirrors it.
        if let Err(e) = state.store.append(&session_id, event.clone()).await {
            error!("Failed to append to session {}: {}", session_id, e);
            continue;
        }

        match serde_json::to_string(&event) {
            Ok(payload) => {
                let delivered = state.registry.publish(&session_id, &payload).await;
                debug!(
                    "Broadcast event to {} connection(s) on session {}",
                    delivered, session_id
                );
            }
            Err(e) => error!("Failed to serialize event: {}", e),
        }
    }

    state.registry.unsubscribe(&session_id, conn_id).await;
    forward_task.abort();

    info!("Connection {:?} closed on session {}", conn_id, session_id);
}
