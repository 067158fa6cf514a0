use super::{Recognition, RecognitionEngine, RecognitionError};
use std::sync::Arc;
use tracing::debug;

/// Bridges the blocking [`RecognitionEngine`] into the async connection
/// loop. Each call runs as a `spawn_blocking` task, so a slow or stalled
/// engine ties up a blocking-pool thread, never a runtime worker.
#[derive(Clone)]
pub struct RecognitionAdapter {
    engine: Arc<dyn RecognitionEngine>,
}

impl RecognitionAdapter {
    pub fn new(engine: Arc<dyn RecognitionEngine>) -> Self {
        Self { engine }
    }

    pub async fn recognize(&self, audio: Vec<u8>) -> Result<Recognition, RecognitionError> {
        let engine = Arc::clone(&self.engine);
        debug!(
            "Dispatching {} byte frame to engine {}",
            audio.len(),
            engine.name()
        );

        tokio::task::spawn_blocking(move || engine.recognize(&audio))
            .await
            .map_err(|_| RecognitionError::Cancelled)?
    }
}
