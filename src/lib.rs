pub mod broadcast;
pub mod config;
pub mod http;
pub mod recognition;
pub mod session;

pub use broadcast::{BroadcastRegistry, ConnectionId};
pub use config::Config;
pub use http::{create_router, AppState};
pub use recognition::{
    AzureSpeechEngine, Recognition, RecognitionAdapter, RecognitionEngine, RecognitionError,
};
pub use session::{
    ExportContent, ExportError, ExportFormat, SessionSnapshot, SessionStore, StoreError,
    TranscriptionEvent,
};
