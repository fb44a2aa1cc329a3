//! Error types for the almanac ecosystem.
//!
//! The recurrence engine itself never fails: every query resolves to a
//! verdict or a (possibly empty) list. These errors cover the edges around
//! it: loading configuration, calendar definitions and event files, parsing
//! dates, and validating descriptors before they are stored.

use thiserror::Error;

/// Errors that can occur in almanac operations.
#[derive(Error, Debug)]
pub enum AlmanacError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid calendar definition: {0}")]
    Calendar(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid recurrence for event '{event}': {reason}")]
    InvalidDescriptor { event: String, reason: String },

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AlmanacError {
    pub(crate) fn descriptor(event: &str, reason: impl Into<String>) -> Self {
        AlmanacError::InvalidDescriptor {
            event: event.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for almanac operations.
pub type AlmanacResult<T> = Result<T, AlmanacError>;
