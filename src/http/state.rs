use crate::broadcast::BroadcastRegistry;
use crate::recognition::RecognitionAdapter;
use crate::session::SessionStore;

/// Shared application state for HTTP and WebSocket handlers. Cloning is
/// cheap: every member is Arc-backed.
#[derive(Clone)]
pub struct AppState {
    /// Session id → transcript log + start time
    pub store: SessionStore,

    /// Session id → live connections subscribed to its events
    pub registry: BroadcastRegistry,

    /// Offloaded speech-recognition calls
    pub recognizer: RecognitionAdapter,
}

impl AppState {
    pub fn new(recognizer: RecognitionAdapter) -> Self {
        Self {
            store: SessionStore::new(),
            registry: BroadcastRegistry::new(),
            recognizer,
        }
    }
}
