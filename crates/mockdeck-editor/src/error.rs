//! Error type for the editing core.

use thiserror::Error;

/// Errors raised by the mock editor.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Unknown header preset: {0} (expected one of html, xml, json, text)")]
    UnknownPreset(String),
    #[error("No scenario selected; create a scenario before saving a mock")]
    NoScenarioSelected,
    #[error("Request is not mocked; there is nothing to delete")]
    NotMocked,
    #[error("Edit session is closed")]
    SessionClosed,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EditorError>;
