use super::handlers;
use super::state::AppState;
use super::ws;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session lifecycle
        .route("/start-session", post(handlers::start_session))
        .route("/session/:session_id", get(handlers::get_session))
        .route("/end-session/:session_id", post(handlers::end_session))
        .route("/export/:session_id", post(handlers::export_session))
        // Live audio streaming
        .route("/ws/record/:session_id", get(ws::record_stream))
        // Request logging + permissive CORS for browser clients
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
