//! Repository connecting builders to the transport
//!
//! Translates parameter snapshots into `HttpRequest`s, runs them through
//! the configured `HttpTransport` and turns the outcome into a
//! `ResultEnvelope`. Expected failures never leave this module as `Err`.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use log::{debug, warn};
use reqwest::header::{HeaderMap, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use super::common::{
    encode_options, insert_header, insert_optional_header, IMAGE_CONTENT_TYPE, X_API_KEY, X_OPTIONS,
    X_SESSION,
};
use super::feedback::Feedback;
use super::models::{
    map_detect_response, map_match_response, map_sku_response, DetectResponse, MatchResponse,
    SkuResponse,
};
use super::params::{FeedbackParams, ImageMatchingParams, ObjectDetectionParams, SkuMatchingParams};
use crate::config::SdkConfig;
use crate::core::{FormPart, HttpRequest, HttpResponse, HttpTransport, RequestBody, TransportError};
use crate::error::mapping::{normalize, FailureCause};
use crate::error::{Result, SdkError};
use crate::result::ResultEnvelope;
use crate::util::{measure_time_async, sanitize_for_logging, truncate_string};

/// Longest response body excerpt written to the debug log
const MAX_LOGGED_BODY: usize = 500;

type RequestResult = std::result::Result<HttpRequest, TransportError>;

/// API repository shared by every builder of one SDK instance
pub struct ApiRepository {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    api_key: String,
    user_agent: String,
    debug: bool,
}

impl ApiRepository {
    /// Create a repository from a validated configuration
    pub fn new(config: &SdkConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            SdkError::configuration(format!("Invalid base URL {}: {}", config.base_url, e))
        })?;

        Ok(Self {
            transport,
            base_url,
            api_key: config.api_key.clone(),
            user_agent: config.user_agent.clone(),
            debug: config.debug,
        })
    }

    /// `POST /find/v1.1`
    pub async fn find(
        &self,
        image: Vec<u8>,
        params: ImageMatchingParams,
    ) -> Result<ResultEnvelope<MatchResponse>> {
        let request = self.find_request(image, &params);
        self.execute_json(request, map_match_response).await
    }

    /// `POST /find/v2/regions`
    pub async fn find_regions(
        &self,
        image: Vec<u8>,
        params: ObjectDetectionParams,
    ) -> Result<ResultEnvelope<DetectResponse>> {
        let request = self.find_regions_request(image, &params);
        self.execute_json(request, map_detect_response).await
    }

    /// `GET /recommend/v1/{sku}`
    pub async fn recommend(
        &self,
        sku: String,
        params: SkuMatchingParams,
    ) -> Result<ResultEnvelope<SkuResponse>> {
        let request = self.recommend_request(&sku, &params);
        self.execute_json(request, map_sku_response).await
    }

    /// `POST /feedback/v1`
    pub async fn send_feedback(
        &self,
        feedback: Feedback,
        params: FeedbackParams,
    ) -> Result<ResultEnvelope<()>> {
        let request = self.feedback_request(&feedback, &params);
        self.execute_empty(request).await
    }

    fn find_request(&self, image: Vec<u8>, params: &ImageMatchingParams) -> RequestResult {
        let mut url = self.endpoint(&["find", "v1.1"])?;
        if let Some(geo) = params.geolocation {
            url.query_pairs_mut()
                .append_pair("lat", &geo.lat.to_string())
                .append_pair("lon", &geo.lon.to_string())
                .append_pair("dist", &geo.distance.to_string());
        }

        let mut request = HttpRequest::new(Method::POST, url);
        self.apply_common_headers(&mut request.headers, params.session.as_deref())?;
        insert_optional_header(
            &mut request.headers,
            X_OPTIONS,
            encode_options(params.limit, params.threshold).as_deref(),
        )?;
        insert_optional_header(&mut request.headers, ACCEPT_LANGUAGE, params.language.as_deref())?;

        request.body = if params.filters.is_empty() {
            insert_header(&mut request.headers, CONTENT_TYPE, IMAGE_CONTENT_TYPE)?;
            RequestBody::Bytes(image)
        } else {
            RequestBody::Multipart(multipart_with_filters(image, params))
        };

        Ok(request)
    }

    fn find_regions_request(
        &self,
        image: Vec<u8>,
        params: &ObjectDetectionParams,
    ) -> RequestResult {
        let url = self.endpoint(&["find", "v2", "regions"])?;
        let mut request = HttpRequest::new(Method::POST, url);
        self.apply_common_headers(&mut request.headers, params.session.as_deref())?;
        insert_header(&mut request.headers, CONTENT_TYPE, IMAGE_CONTENT_TYPE)?;
        request.body = RequestBody::Bytes(image);
        Ok(request)
    }

    fn recommend_request(&self, sku: &str, params: &SkuMatchingParams) -> RequestResult {
        if sku.trim().is_empty() {
            return Err(TransportError::Request("SKU must not be empty".to_string()));
        }

        let url = self.endpoint(&["recommend", "v1", sku])?;
        let mut request = HttpRequest::new(Method::GET, url);
        self.apply_common_headers(&mut request.headers, params.session.as_deref())?;
        insert_optional_header(
            &mut request.headers,
            X_OPTIONS,
            encode_options(params.limit, params.threshold).as_deref(),
        )?;
        insert_optional_header(&mut request.headers, ACCEPT_LANGUAGE, params.language.as_deref())?;
        Ok(request)
    }

    fn feedback_request(&self, feedback: &Feedback, params: &FeedbackParams) -> RequestResult {
        let url = self.endpoint(&["feedback", "v1"])?;
        let mut request = HttpRequest::new(Method::POST, url);
        self.apply_common_headers(&mut request.headers, params.session.as_deref())?;
        request.body = RequestBody::Json(json!({
            "request_id": params.request_id,
            "session_id": params.session,
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            "event": feedback.event_name(),
            "data": feedback.payload(),
        }));
        Ok(request)
    }

    /// Resolve path segments against the base URL, percent-encoding each one
    ///
    /// `.` and `..` are rejected: the URL parser would drop them and the
    /// request would reach a different endpoint.
    fn endpoint(&self, segments: &[&str]) -> std::result::Result<Url, TransportError> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(TransportError::Request(format!(
                "Path segment {:?} cannot be sent as-is",
                segment
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                TransportError::Request(format!("Base URL cannot carry a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn apply_common_headers(
        &self,
        headers: &mut HeaderMap,
        session: Option<&str>,
    ) -> std::result::Result<(), TransportError> {
        insert_header(headers, X_API_KEY, &self.api_key)?;
        insert_header(headers, USER_AGENT, &self.user_agent)?;
        insert_optional_header(headers, X_SESSION, session)
    }

    async fn execute_json<D, M, F>(
        &self,
        request: RequestResult,
        map: F,
    ) -> Result<ResultEnvelope<M>>
    where
        D: DeserializeOwned,
        F: FnOnce(D) -> M,
    {
        match self.dispatch(request).await? {
            ResultEnvelope::Success(response) => {
                let dto: D = serde_json::from_slice(&response.body)
                    .map_err(|e| SdkError::parsing(format!("Failed to parse response: {}", e)))?;
                Ok(ResultEnvelope::Success(map(dto)))
            }
            ResultEnvelope::Failure(error) => Ok(ResultEnvelope::Failure(error)),
        }
    }

    async fn execute_empty(&self, request: RequestResult) -> Result<ResultEnvelope<()>> {
        Ok(self.dispatch(request).await?.map(|_| ()))
    }

    /// Run exactly one transport round trip
    async fn dispatch(&self, request: RequestResult) -> Result<ResultEnvelope<HttpResponse>> {
        let request = match request {
            Ok(request) => request,
            Err(err) => return self.fail(FailureCause::Transport(err)),
        };

        let method = request.method.clone();
        let url = request.url.clone();
        if self.debug {
            debug!(
                "--> {} {} [{}]",
                method,
                url,
                sanitize_for_logging(&format_headers(&request.headers))
            );
        }

        let (outcome, elapsed) = measure_time_async(|| self.transport.send(request)).await;

        match outcome {
            Ok(response) => {
                if self.debug {
                    debug!(
                        "<-- {} {} {} ({:.2}ms) {}",
                        response.status,
                        method,
                        url,
                        elapsed.as_secs_f64() * 1000.0,
                        truncate_string(&String::from_utf8_lossy(&response.body), MAX_LOGGED_BODY)
                    );
                }

                if response.is_success() {
                    Ok(ResultEnvelope::Success(response))
                } else {
                    self.fail(FailureCause::Status {
                        status: response.status,
                        body: response.body,
                    })
                }
            }
            Err(err) => {
                if self.debug {
                    warn!("<-- {} {} failed: {}", method, url, err);
                }
                self.fail(FailureCause::Transport(err))
            }
        }
    }

    fn fail<T>(&self, cause: FailureCause) -> Result<ResultEnvelope<T>> {
        let error = normalize(cause)?;
        if self.debug {
            debug!("Request failed: {}", error);
        }
        Ok(ResultEnvelope::Failure(error))
    }
}

/// Build the multipart body used when filters are present
///
/// Filter keys are sorted so the part order is stable.
fn multipart_with_filters(image: Vec<u8>, params: &ImageMatchingParams) -> Vec<FormPart> {
    let mut parts = vec![FormPart::File {
        name: "image".to_string(),
        file_name: "image.jpg".to_string(),
        content_type: IMAGE_CONTENT_TYPE.to_string(),
        data: image,
    }];

    let mut filter_types: Vec<&String> = params.filters.keys().collect();
    filter_types.sort();

    for (i, filter_type) in filter_types.into_iter().enumerate() {
        parts.push(FormPart::Text {
            name: format!("filters[{}].filterType", i),
            value: filter_type.clone(),
        });
        for (j, value) in params.filters[filter_type].iter().enumerate() {
            parts.push(FormPart::Text {
                name: format!("filters[{}].filterValues[{}]", i, j),
                value: value.clone(),
            });
        }
    }

    parts
}

fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value.to_str().unwrap_or("<binary>")))
        .collect::<Vec<_>>()
        .join(", ")
}
