//! Error types for the unisched ecosystem.

use thiserror::Error;

/// Errors that can occur in unisched operations.
#[derive(Error, Debug)]
pub enum SchedError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid event data: {0}")]
    InvalidEventData(String),

    #[error("Course not found: {0}")]
    CourseNotFound(String),

    #[error("HTML parse error: {0}")]
    HtmlParse(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for unisched operations.
pub type SchedResult<T> = Result<T, SchedError>;
