use serde::{Deserialize, Serialize};

/// One unit of recognized speech. Immutable once appended to a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionEvent {
    /// Recognized text. Never empty: empty recognition results are discarded
    /// before they become events.
    pub text: String,

    /// Speaker attribution, or `"Unknown"` when the engine could not tell.
    pub speaker: String,

    /// Unix timestamp (seconds) at which the result was produced.
    pub timestamp: f64,
}

/// Point-in-time view of a session, as returned by the lifecycle API.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// Transcript in server-side append order.
    pub transcriptions: Vec<TranscriptionEvent>,

    /// Unix timestamp (seconds) at which the session was created.
    pub start_time: f64,

    /// Seconds elapsed since the session was created.
    pub duration: f64,
}
