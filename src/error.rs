use std::io;
use thiserror::Error;

use crate::platform::command::CommandError;

/// Custom error type for resmon
#[derive(Error, Debug)]
pub enum ResmonError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Command(#[from] CommandError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),
}

/// Result type alias for resmon
pub type Result<T> = std::result::Result<T, ResmonError>;

impl ResmonError {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ResmonError::InvalidArgument(msg.into())
    }

    /// A metric whose every source failed
    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        ResmonError::MetricCollection(msg.into())
    }
}
