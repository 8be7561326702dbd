//! Shared test doubles

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::config::SdkConfig;
use crate::core::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::sdk::VisualSearch;

pub const TEST_API_KEY: &str = "test_api_key";
pub const TEST_BASE_URL: &str = "https://api.example.com";

/// Transport that records every request and replays queued responses
///
/// Once the queue is empty it answers `200 {}`.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond_with(&self, response: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn respond_json(&self, status: u16, body: &Value) {
        self.respond_with(Ok(HttpResponse::new(status, body.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, "{}")))
    }
}

pub fn test_config() -> SdkConfig {
    SdkConfig {
        base_url: TEST_BASE_URL.to_string(),
        ..SdkConfig::new(TEST_API_KEY)
    }
}

pub fn sdk_with(transport: Arc<dyn HttpTransport>) -> VisualSearch {
    VisualSearch::with_transport(test_config(), transport).expect("Failed to build SDK")
}
