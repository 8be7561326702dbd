//! # Visual Search SDK
//!
//! A typed client for an image matching and object detection API.
//!
//! This crate provides:
//!
//! - One request builder per capability: image matching, object detection,
//!   SKU matching and feedback
//! - Synchronous validation of builder inputs
//! - A `ResultEnvelope` carrying either the mapped domain model or a
//!   `DomainError` from a closed taxonomy
//! - Configuration management with environment variable support
//!
//! ## Architecture
//!
//! - `VisualSearch`: the SDK instance, built once and cloned freely
//! - `*RequestBuilder`: accumulate parameters, then fire one request
//! - `ApiRepository`: turns parameter snapshots into HTTP requests
//! - `HttpTransport`: the network seam, backed by reqwest by default
//! - `error::mapping::normalize`: folds failures into `DomainError`

pub mod core;
pub use core::{HttpTransport, ReqwestTransport, SdkBuilder};

pub mod services;
pub use services::{
    DetectResponse, Feedback, FeedbackRequestBuilder, ImageMatchingRequestBuilder, MatchResponse,
    ObjectDetectionRequestBuilder, Offer, RegionFeedback, SkuMatchingRequestBuilder, SkuResponse,
};

pub mod error;
pub use error::{DomainError, InvalidArgument, Result, SdkError};

pub mod config;
pub use config::{ConfigProvider, SdkConfig};

pub mod result;
pub use result::ResultEnvelope;

pub mod validation;

mod sdk;
pub use sdk::VisualSearch;

mod util;

#[cfg(test)]
mod tests;

/// Create a new SDK builder
pub fn builder() -> SdkBuilder {
    SdkBuilder::new()
}
