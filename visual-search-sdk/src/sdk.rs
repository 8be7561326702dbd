//! The SDK instance
//!
//! `VisualSearch` is the single object callers hold. It is built once from
//! an `SdkConfig`, owns the shared repository and transport, and hands out
//! a fresh request builder per call. Nothing in it changes after
//! construction; to change configuration, build a new instance.

use std::sync::Arc;

use log::debug;

use crate::config::SdkConfig;
use crate::core::{HttpTransport, SdkBuilder};
use crate::error::Result;
use crate::services::{
    ApiRepository, FeedbackRequestBuilder, ImageMatchingRequestBuilder,
    ObjectDetectionRequestBuilder, SkuMatchingRequestBuilder,
};

#[derive(Clone)]
pub struct VisualSearch {
    config: Arc<SdkConfig>,
    repository: Arc<ApiRepository>,
}

impl VisualSearch {
    /// Create an instance using the default reqwest transport
    pub fn new(config: SdkConfig) -> Result<Self> {
        SdkBuilder::from_config(config).build()
    }

    /// Create an instance with default settings and the given API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(SdkConfig::new(api_key))
    }

    /// Create an instance from `VISUAL_SEARCH_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(SdkConfig::from_env()?)
    }

    /// Create an instance with an explicit transport
    pub fn with_transport(config: SdkConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        config.validate()?;
        let repository = ApiRepository::new(&config, transport)?;

        if config.debug {
            debug!(
                "Visual search SDK initialized (base_url={}, timeout={}ms)",
                config.base_url,
                config.timeout.as_millis()
            );
        }

        Ok(Self {
            config: Arc::new(config),
            repository: Arc::new(repository),
        })
    }

    /// Create a new builder
    pub fn builder() -> SdkBuilder {
        SdkBuilder::new()
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn image_matching(&self) -> ImageMatchingRequestBuilder {
        ImageMatchingRequestBuilder::new(Arc::clone(&self.repository))
    }

    pub fn object_detection(&self) -> ObjectDetectionRequestBuilder {
        ObjectDetectionRequestBuilder::new(Arc::clone(&self.repository))
    }

    pub fn sku_matching(&self) -> SkuMatchingRequestBuilder {
        SkuMatchingRequestBuilder::new(Arc::clone(&self.repository))
    }

    pub fn feedback(&self) -> FeedbackRequestBuilder {
        FeedbackRequestBuilder::new(Arc::clone(&self.repository))
    }
}
