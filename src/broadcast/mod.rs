//! Broadcast groups: fan-out of live transcription events to every
//! connection subscribed to a session.

mod registry;

pub use registry::{BroadcastRegistry, ConnectionId};
