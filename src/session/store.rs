use super::event::{SessionSnapshot, TranscriptionEvent};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("Session {0} not found")]
    NotFound(String),
}

struct Session {
    started_at: DateTime<Utc>,
    /// Transcript in append order. Appends from concurrent connections in the
    /// same session serialize on this mutex.
    events: Mutex<Vec<TranscriptionEvent>>,
}

impl Session {
    fn new() -> Self {
        Self {
            started_at: Utc::now(),
            events: Mutex::new(Vec::new()),
        }
    }

    fn start_time(&self) -> f64 {
        self.started_at.timestamp_millis() as f64 / 1000.0
    }
}

/// Process-wide registry of sessions (session id → transcript log + start
/// time). Sessions are never evicted within the process lifetime.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Arc<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a session with an empty transcript and `start_time = now()`.
    /// Idempotent: an existing session is left untouched.
    pub async fn create(&self, session_id: &str) {
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(session_id) {
            debug!("Creating session: {}", session_id);
            sessions.insert(session_id.to_string(), Arc::new(Session::new()));
        }
    }

    pub async fn contains(&self, session_id: &str) -> bool {
        let sessions = self.sessions.read().await;
        sessions.contains_key(session_id)
    }

    /// Append an event to the session's transcript. The global map lock is
    /// released before the per-session mutex is taken, so appends to one
    /// session never stall lookups of another.
    pub async fn append(
        &self,
        session_id: &str,
        event: TranscriptionEvent,
    ) -> Result<(), StoreError> {
        let session = self.get(session_id).await?;
        let mut events = session.events.lock().await;
        events.push(event);
        Ok(())
    }

    /// Current transcript plus timing, cloned out so callers never hold the
    /// session lock.
    pub async fn snapshot(&self, session_id: &str) -> Result<SessionSnapshot, StoreError> {
        let session = self.get(session_id).await?;
        let transcriptions = {
            let events = session.events.lock().await;
            events.clone()
        };
        let start_time = session.start_time();
        let duration = Utc::now()
            .signed_duration_since(session.started_at)
            .num_milliseconds() as f64
            / 1000.0;

        Ok(SessionSnapshot {
            transcriptions,
            start_time,
            duration,
        })
    }

    async fn get(&self, session_id: &str) -> Result<Arc<Session>, StoreError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(session_id.to_string()))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
