//! SKU matching request builder

use std::future::Future;
use std::mem;
use std::sync::Arc;

use super::models::SkuResponse;
use super::params::SkuMatchingParams;
use super::repository::ApiRepository;
use crate::error::Result;
use crate::result::ResultEnvelope;
use crate::validation;

/// Builder for SKU matching (similar products) requests
pub struct SkuMatchingRequestBuilder {
    repository: Arc<ApiRepository>,
    params: SkuMatchingParams,
}

impl SkuMatchingRequestBuilder {
    pub(crate) fn new(repository: Arc<ApiRepository>) -> Self {
        Self {
            repository,
            params: SkuMatchingParams::default(),
        }
    }

    /// Maximum number of offers, within `[1, 100]`
    pub fn limit(&mut self, limit: u32) -> Result<&mut Self> {
        self.params.limit = Some(validation::limit(limit)?);
        Ok(self)
    }

    pub fn language(&mut self, language: impl Into<String>) -> &mut Self {
        self.params.language = Some(language.into());
        self
    }

    /// Minimum match score, within `[0.01, 1.0]`
    pub fn threshold(&mut self, threshold: f32) -> Result<&mut Self> {
        self.params.threshold = Some(validation::threshold(threshold)?);
        Ok(self)
    }

    pub fn session(&mut self, session: impl Into<String>) -> &mut Self {
        self.params.session = Some(session.into());
        self
    }

    pub fn params(&self) -> &SkuMatchingParams {
        &self.params
    }

    /// Find offers similar to the given SKU
    pub fn match_sku(
        &mut self,
        sku: impl Into<String>,
    ) -> impl Future<Output = Result<ResultEnvelope<SkuResponse>>> + Send + 'static {
        let params = mem::take(&mut self.params);
        let sku = sku.into();
        let repository = Arc::clone(&self.repository);
        async move { repository.recommend(sku, params).await }
    }
}
