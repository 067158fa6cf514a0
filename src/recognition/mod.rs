//! Speech-recognition integration.
//!
//! The engine itself is an external collaborator behind the
//! [`RecognitionEngine`] trait; [`RecognitionAdapter`] dispatches its
//! (potentially slow, blocking) calls onto tokio's blocking pool so the
//! connection-handling tasks stay responsive.

mod adapter;
mod azure;

pub use adapter::RecognitionAdapter;
pub use azure::AzureSpeechEngine;

use chrono::Utc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("Recognition engine request failed: {message}")]
    Engine { message: String },

    #[error("Recognition engine returned malformed data: {message}")]
    MalformedResponse { message: String },

    #[error("Recognition task was cancelled")]
    Cancelled,
}

/// Result of running one audio frame through the engine.
///
/// Empty `text` is the "no speech detected" sentinel, not an error: the
/// caller discards it without appending or broadcasting anything.
#[derive(Debug, Clone)]
pub struct Recognition {
    pub text: String,
    pub speaker: Option<String>,
    /// Unix timestamp (seconds) at which the result was produced.
    pub timestamp: f64,
}

impl Recognition {
    /// The "nothing recognized" sentinel.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            speaker: None,
            timestamp: now_unix(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Speaker attribution with the defined default.
    pub fn speaker_or_unknown(&self) -> String {
        self.speaker.clone().unwrap_or_else(|| "Unknown".to_string())
    }
}

pub(crate) fn now_unix() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// A speech-recognition engine: bytes in, recognized text (with optional
/// speaker attribution) out. Implementations may block for the duration of a
/// network round-trip; callers go through [`RecognitionAdapter`] which keeps
/// that off the async runtime.
pub trait RecognitionEngine: Send + Sync {
    fn recognize(&self, audio: &[u8]) -> Result<Recognition, RecognitionError>;

    /// Engine name for logging.
    fn name(&self) -> &str;
}
