//! Core abstractions for the Visual Search SDK
//!
//! This module provides the seam between the SDK and the network:
//!
//! - `HttpTransport`: sends one request and returns status + body
//! - `HttpRequest` / `RequestBody`: transport-neutral request description
//! - `ReqwestTransport`: the default transport backed by reqwest
//! - `SdkBuilder`: builder pattern for creating a `VisualSearch` instance

pub mod builder;
pub mod http;

pub use builder::SdkBuilder;
pub use http::ReqwestTransport;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Method;
use thiserror::Error;
use url::Url;

/// Failures raised by a transport before a response status is known
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The request could not be built or encoded locally
    #[error("Invalid request: {0}")]
    Request(String),

    /// Connection could not be established or was lost mid-flight
    #[error("Connection error: {0}")]
    Connection(String),

    /// The configured client timeout elapsed
    #[error("Request timed out: {0}")]
    Timeout(String),
}

/// One part of a multipart form body
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    },
}

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Raw bytes; the content type is carried in the request headers
    Bytes(Vec<u8>),
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

/// A fully described HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    /// Get a header value as a string, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get the first value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability to send a request and receive status + body
///
/// Any HTTP status, success or not, is an `Ok` response. `Err` is reserved
/// for failures where no status was received.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
