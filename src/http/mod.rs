//! HTTP surface: session lifecycle REST API plus the per-session audio
//! streaming WebSocket.
//!
//! - POST /start-session - Create a fresh session, return its id
//! - GET /session/:id - Current transcript and start time
//! - POST /end-session/:id - Transcript plus duration (non-sealing)
//! - POST /export/:id?format= - Render the transcript (text | structured)
//! - GET /ws/record/:id - Stream audio frames, receive live events
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;
mod ws;

pub use routes::create_router;
pub use state::AppState;
