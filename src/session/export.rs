use super::event::TranscriptionEvent;
use chrono::{TimeZone, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExportError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Plain text: one `speaker (HH:MM:SS): text` paragraph per event.
    Text,
    /// The raw ordered event list.
    Structured,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "structured" => Ok(Self::Structured),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Structured => write!(f, "structured"),
        }
    }
}

/// Export payload: a rendered string for `text`, the event list for
/// `structured`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ExportContent {
    Text(String),
    Structured(Vec<TranscriptionEvent>),
}

/// Render a transcript in the requested format, in transcript order.
/// Timestamps are formatted as UTC wall-clock times.
pub fn render(events: &[TranscriptionEvent], format: ExportFormat) -> ExportContent {
    match format {
        ExportFormat::Text => {
            let mut content = String::new();
            for event in events {
                content.push_str(&format!(
                    "{} ({}): {}\n\n",
                    event.speaker,
                    format_clock(event.timestamp),
                    event.text
                ));
            }
            ExportContent::Text(content)
        }
        ExportFormat::Structured => ExportContent::Structured(events.to_vec()),
    }
}

fn format_clock(timestamp: f64) -> String {
    let secs = timestamp.floor() as i64;
    match Utc.timestamp_opt(secs, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%H:%M:%S").to_string(),
        _ => "00:00:00".to_string(),
    }
}
