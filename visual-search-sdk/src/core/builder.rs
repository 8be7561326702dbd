//! SDK builder implementation
//!
//! Provides a builder pattern for configuring and creating a `VisualSearch`
//! instance.

use std::sync::Arc;
use std::time::Duration;

use super::{HttpTransport, ReqwestTransport};
use crate::config::{ConfigProvider, SdkConfig};
use crate::error::Result;
use crate::sdk::VisualSearch;

/// Builder for `VisualSearch`
#[derive(Default)]
pub struct SdkBuilder {
    config: SdkConfig,

    /// Custom transport; the reqwest transport is used when unset
    transport: Option<Arc<dyn HttpTransport>>,
}

impl SdkBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a configuration loaded from a provider
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        Ok(Self {
            config: SdkConfig::from_provider(provider)?,
            transport: None,
        })
    }

    /// Start from an existing configuration
    pub fn from_config(config: SdkConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = api_key.into();
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Enable request/response logging
    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    /// Overall timeout for each request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Use a custom transport instead of the reqwest one
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate the configuration and build the SDK instance
    pub fn build(self) -> Result<VisualSearch> {
        self.config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                &self.config.user_agent,
                self.config.timeout,
            )?),
        };

        VisualSearch::with_transport(self.config, transport)
    }
}
