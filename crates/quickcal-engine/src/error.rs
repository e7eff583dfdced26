//! Error types for quickcal-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid query window: {0}")]
    InvalidWindow(String),
}

impl EngineError {
    pub(crate) fn timestamp(value: &str, reason: impl Into<String>) -> Self {
        EngineError::InvalidTimestamp {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
