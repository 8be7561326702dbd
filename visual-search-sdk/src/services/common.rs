//! Common utilities for request construction
//!
//! Header names and encoders shared by every capability.

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::core::TransportError;

pub const X_API_KEY: HeaderName = HeaderName::from_static("x-api-key");
pub const X_SESSION: HeaderName = HeaderName::from_static("x-session");
pub const X_OPTIONS: HeaderName = HeaderName::from_static("x-options");

/// Content type used for raw image uploads
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// UserAgent structure for identifying the client to the API
#[derive(Debug, Clone)]
pub struct UserAgent {
    /// Application name
    pub app_name: String,

    /// Version string
    pub version: String,

    /// Optional extra info
    pub extra: Option<String>,
}

impl Default for UserAgent {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            extra: Some("rust".to_string()),
        }
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.app_name, self.version)?;

        if let Some(ref extra) = self.extra {
            write!(f, " ({})", extra)?;
        }

        Ok(())
    }
}

/// Encode `limit`/`threshold` as the space-joined `X-Options` value
///
/// Returns `None` when neither option is set.
pub fn encode_options(limit: Option<u32>, threshold: Option<f32>) -> Option<String> {
    let mut options = Vec::new();

    if let Some(limit) = limit {
        options.push(format!("limit={}", limit));
    }

    if let Some(threshold) = threshold {
        options.push(format!("threshold={}", threshold));
    }

    if options.is_empty() {
        None
    } else {
        Some(options.join(" "))
    }
}

/// Insert a header, failing with a request construction error on invalid values
pub fn insert_header(
    headers: &mut HeaderMap,
    name: HeaderName,
    value: &str,
) -> Result<(), TransportError> {
    let header_value = HeaderValue::from_str(value).map_err(|e| {
        TransportError::Request(format!("Invalid value for header {}: {}", name, e))
    })?;
    headers.insert(name, header_value);
    Ok(())
}

/// Insert a header only when a value is present
pub fn insert_optional_header(
    headers: &mut HeaderMap,
    name: HeaderName,
    value: Option<&str>,
) -> Result<(), TransportError> {
    match value {
        Some(value) => insert_header(headers, name, value),
        None => Ok(()),
    }
}
