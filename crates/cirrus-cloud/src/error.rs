//! Resource operation error types

use thiserror::Error;

/// Errors raised by resource handlers and their dispatch
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("Missing attribute: {0}")]
    MissingAttribute(String),

    #[error("Invalid attribute {attribute}: {reason}")]
    InvalidAttribute { attribute: String, reason: String },

    #[error("API error: {0}")]
    ApiError(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;
