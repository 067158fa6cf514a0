//! Session state: the process-wide transcript store and export rendering.
//!
//! A session is a logical meeting identified by an opaque id. It holds an
//! ordered, append-only transcript and a fixed start time. Sessions are
//! created on demand (explicitly via the REST API, or implicitly by the
//! first streaming connection) and live for the lifetime of the process.

mod event;
mod export;
mod store;

pub use event::{SessionSnapshot, TranscriptionEvent};
pub use export::{render, ExportContent, ExportError, ExportFormat};
pub use store::{SessionStore, StoreError};
