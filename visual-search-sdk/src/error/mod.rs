//! Error handling for the Visual Search SDK
//!
//! Two layers of errors live here:
//! - `SdkError`: raised synchronously (invalid builder input, bad
//!   configuration) or returned unchanged for failures the SDK does not
//!   classify (connection loss, timeouts, undecodable success bodies)
//! - `DomainError`: the closed set of API failures delivered inside
//!   `ResultEnvelope::Failure`

use std::fmt;
use thiserror::Error;

use crate::core::TransportError;

pub mod mapping;

/// Result type for Visual Search SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

/// A builder input that failed validation
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field} must be within {allowed}, got {value}")]
pub struct InvalidArgument {
    /// Name of the offending field
    pub field: &'static str,

    /// The rejected value, rendered for display
    pub value: String,

    /// The allowed range or set, rendered for display
    pub allowed: String,
}

impl InvalidArgument {
    /// Create a new invalid argument error
    pub fn new(field: &'static str, value: impl fmt::Display, allowed: impl Into<String>) -> Self {
        Self {
            field,
            value: value.to_string(),
            allowed: allowed.into(),
        }
    }
}

/// Main error type for the Visual Search SDK
#[derive(Error, Debug)]
pub enum SdkError {
    /// A builder setter or feedback constructor rejected its input
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// Missing or malformed SDK configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport failure outside the domain taxonomy
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A successful response whose body could not be decoded
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// A non-success status that is neither a client nor a server error
    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl SdkError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        SdkError::Configuration(message.into())
    }

    /// Create a parsing error
    pub fn parsing(message: impl Into<String>) -> Self {
        SdkError::Parsing(message.into())
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SdkError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error was raised before any network I/O happened
    pub fn is_caller_error(&self) -> bool {
        matches!(self, SdkError::InvalidArgument(_) | SdkError::Configuration(_))
    }
}

/// Convert serde_json errors to SdkError
impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::parsing(format!("JSON error: {}", err))
    }
}

/// Closed set of API failures surfaced to callers
///
/// None of these are retried by the SDK.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Structured error body returned with an HTTP error status
    #[error(
        "Response error (status {}): {} - {}",
        .status_code.map(|s| s.to_string()).unwrap_or_else(|| "unknown".to_string()),
        .title.as_deref().unwrap_or("untitled"),
        .detail.as_deref().unwrap_or("no detail")
    )]
    ResponseError {
        title: Option<String>,
        status_code: Option<u16>,
        detail: Option<String>,
        trace_id: Option<String>,
        item_key: Option<String>,
    },

    /// 4xx without a structured body, or a request that could not be built
    #[error("Client error: {message}")]
    ClientError { message: String },

    /// 5xx without a structured body
    #[error("Server error: {message}")]
    ServerError { message: String },
}

impl DomainError {
    /// Create a client error
    pub fn client(message: impl Into<String>) -> Self {
        DomainError::ClientError {
            message: message.into(),
        }
    }

    /// Create a server error
    pub fn server(message: impl Into<String>) -> Self {
        DomainError::ServerError {
            message: message.into(),
        }
    }

    /// Get the HTTP status code carried by a structured error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DomainError::ResponseError { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Get the trace id carried by a structured error
    pub fn trace_id(&self) -> Option<&str> {
        match self {
            DomainError::ResponseError { trace_id, .. } => trace_id.as_deref(),
            _ => None,
        }
    }
}
