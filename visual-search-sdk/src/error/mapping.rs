//! Error mapping for API failures
//!
//! This module turns whatever went wrong during a request into either a
//! `DomainError` or, for failures outside the taxonomy, the original
//! condition returned as an `SdkError`.

use reqwest::StatusCode;
use serde::Deserialize;

use super::{DomainError, Result, SdkError};
use crate::core::TransportError;
use crate::util::truncate_string;

/// Longest body excerpt carried in an error message
const MAX_BODY_PREVIEW: usize = 100;

/// Structured error body returned by the API
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub title: Option<String>,
    pub status: Option<u16>,
    pub detail: Option<String>,
    pub trace_id: Option<String>,
    pub item_key: Option<String>,
}

impl ErrorBody {
    /// Decode a structured error body
    ///
    /// Returns `None` unless the body is a JSON object carrying at least one
    /// of the known fields.
    pub fn decode(body: &[u8]) -> Option<Self> {
        let parsed: Self = serde_json::from_slice(body).ok()?;
        if parsed.title.is_none()
            && parsed.status.is_none()
            && parsed.detail.is_none()
            && parsed.trace_id.is_none()
            && parsed.item_key.is_none()
        {
            return None;
        }
        Some(parsed)
    }
}

impl From<ErrorBody> for DomainError {
    fn from(body: ErrorBody) -> Self {
        DomainError::ResponseError {
            title: body.title,
            status_code: body.status,
            detail: body.detail,
            trace_id: body.trace_id,
            item_key: body.item_key,
        }
    }
}

/// What went wrong with a single request
#[derive(Debug)]
pub enum FailureCause {
    /// The server answered with a non-success status
    Status { status: u16, body: Vec<u8> },

    /// The transport itself failed
    Transport(TransportError),
}

/// Normalize a request failure into the domain taxonomy
///
/// `Ok` carries the domain error to wrap in `ResultEnvelope::Failure`.
/// `Err` is the pass-through branch: connection failures, timeouts and
/// statuses that are neither 4xx nor 5xx are handed back unchanged.
pub fn normalize(cause: FailureCause) -> Result<DomainError> {
    match cause {
        FailureCause::Status { status, body } => {
            if let Some(error_body) = ErrorBody::decode(&body) {
                return Ok(error_body.into());
            }

            let message = status_message(status, &body);
            match classify_status(status) {
                StatusClass::Client => Ok(DomainError::client(message)),
                StatusClass::Server => Ok(DomainError::server(message)),
                StatusClass::Other => Err(SdkError::UnexpectedStatus {
                    status,
                    body: String::from_utf8_lossy(&body).into_owned(),
                }),
            }
        }
        FailureCause::Transport(TransportError::Request(message)) => {
            Ok(DomainError::client(message))
        }
        FailureCause::Transport(other) => Err(SdkError::Transport(other)),
    }
}

/// Coarse classification of an HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Client,
    Server,
    Other,
}

/// Helper function to classify HTTP statuses by category
pub fn classify_status(status: u16) -> StatusClass {
    match status {
        400..=499 => StatusClass::Client,
        500..=599 => StatusClass::Server,
        _ => StatusClass::Other,
    }
}

/// Build a readable message from a status and an unstructured body
fn status_message(status: u16, body: &[u8]) -> String {
    let status_text = StatusCode::from_u16(status)
        .map(|s| s.to_string())
        .unwrap_or_else(|_| status.to_string());

    let body = String::from_utf8_lossy(body);
    let body = body.trim();
    if body.is_empty() {
        status_text
    } else {
        format!("{}: {}", status_text, truncate_string(body, MAX_BODY_PREVIEW))
    }
}
