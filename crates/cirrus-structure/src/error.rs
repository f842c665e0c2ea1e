//! Structural mapping error types

use thiserror::Error;

/// Errors raised while converting between configuration attributes and API shapes
///
/// Every variant carries the offending value so the orchestrator can show the
/// user exactly which block was rejected.
#[derive(Error, Debug)]
pub enum MapperError {
    #[error(
        "Invalid listener: ssl_certificate_id ({certificate_id}) may be set only when protocol is 'https' or 'ssl' \
         (instance_protocol: {instance_protocol}, lb_protocol: {lb_protocol})"
    )]
    InvalidListenerConfig {
        certificate_id: String,
        instance_protocol: String,
        lb_protocol: String,
    },

    #[error(
        "from_port ({from_port}) and to_port ({to_port}) must both be 0 to use the 'ALL' \"-1\" protocol"
    )]
    InvalidProtocolPortCombination { from_port: i32, to_port: i32 },

    #[error("Malformed document, neither JSON nor YAML ({snippet}): {reason}")]
    MalformedDocument { snippet: String, reason: String },

    #[error("Invalid attribute {attribute}: {reason}")]
    InvalidAttribute { attribute: String, reason: String },
}

pub type Result<T> = std::result::Result<T, MapperError>;
