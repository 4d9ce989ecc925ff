//! Error types for rollcall.

use thiserror::Error;

/// Errors that can occur in rollcall operations.
#[derive(Error, Debug)]
pub enum RollcallError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Notion API error: {0}")]
    Remote(String),

    /// An error object returned by the Notion API.
    #[error("Notion API error {code} ({status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Event '{0}' is not loaded; load events before reconciling")]
    UnknownEvent(String),

    #[error("Event page {0} is missing its title or date")]
    MalformedEvent(String),

    #[error("Unknown attendance status '{0}'")]
    UnknownStatus(String),

    #[error("Invalid date '{date}' for event {event_id}")]
    InvalidDate { event_id: String, date: String },

    #[error("Malformed table row {0}")]
    MalformedRow(String),

    #[error("Pagination stopped after {0} pages without reaching the end")]
    PageLimit(usize),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RollcallError {
    /// Whether Notion reported the requested object as missing.
    pub fn is_object_not_found(&self) -> bool {
        matches!(self, RollcallError::Api { code, .. } if code == "object_not_found")
    }
}

/// Result type alias for rollcall operations.
pub type RollcallResult<T> = Result<T, RollcallError>;
