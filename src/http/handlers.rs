use super::state::AppState;
use crate::session::{render, ExportContent, ExportError, ExportFormat, StoreError, TranscriptionEvent};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct GetSessionResponse {
    pub transcriptions: Vec<TranscriptionEvent>,
    pub start_time: f64,
}

#[derive(Debug, Serialize)]
pub struct EndSessionResponse {
    pub session_id: String,
    pub transcriptions: Vec<TranscriptionEvent>,
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// Export format (default: "text")
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub content: ExportContent,
    pub format: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Client-facing failures for the lifecycle API. Everything here maps to a
/// 4xx; nothing a single request does is fatal to other sessions.
pub enum ApiError {
    NotFound(String),
    UnsupportedFormat(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(id),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::UnsupportedFormat(fmt) => ApiError::UnsupportedFormat(fmt),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Session {} not found", id),
            ),
            ApiError::UnsupportedFormat(fmt) => (
                StatusCode::BAD_REQUEST,
                format!("Unsupported format: {}", fmt),
            ),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /start-session
/// Create a new session with a fresh id
pub async fn start_session(State(state): State<AppState>) -> impl IntoResponse {
    let session_id = uuid::Uuid::new_v4().to_string();
    state.store.create(&session_id).await;

    info!("Started session: {}", session_id);

    (StatusCode::OK, Json(StartSessionResponse { session_id }))
}

/// GET /session/:session_id
/// Current transcript and start time for a session
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<GetSessionResponse>, ApiError> {
    let snapshot = state.store.snapshot(&session_id).await?;

    Ok(Json(GetSessionResponse {
        transcriptions: snapshot.transcriptions,
        start_time: snapshot.start_time,
    }))
}

/// POST /end-session/:session_id
/// Final transcript and elapsed duration. This is a snapshot read: the
/// session is not sealed, and connections still streaming keep appending.
pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<EndSessionResponse>, ApiError> {
    let snapshot = state.store.snapshot(&session_id).await?;

    info!("Ended session: {}", session_id);

    Ok(Json(EndSessionResponse {
        session_id,
        transcriptions: snapshot.transcriptions,
        duration: snapshot.duration,
    }))
}

/// POST /export/:session_id?format=
/// Render the transcript in the requested format
pub async fn export_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<Json<ExportResponse>, ApiError> {
    // Unknown session wins over unknown format: 404 before 400.
    let snapshot = state.store.snapshot(&session_id).await?;
    let format: ExportFormat = query.format.as_deref().unwrap_or("text").parse()?;

    let content = render(&snapshot.transcriptions, format);

    Ok(Json(ExportResponse {
        content,
        format: format.to_string(),
    }))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
