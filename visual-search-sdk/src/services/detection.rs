//! Object detection request builder

use std::future::Future;
use std::mem;
use std::sync::Arc;

use super::models::DetectResponse;
use super::params::ObjectDetectionParams;
use super::repository::ApiRepository;
use crate::error::Result;
use crate::result::ResultEnvelope;

/// Builder for object detection requests
pub struct ObjectDetectionRequestBuilder {
    repository: Arc<ApiRepository>,
    params: ObjectDetectionParams,
}

impl ObjectDetectionRequestBuilder {
    pub(crate) fn new(repository: Arc<ApiRepository>) -> Self {
        Self {
            repository,
            params: ObjectDetectionParams::default(),
        }
    }

    pub fn session(&mut self, session: impl Into<String>) -> &mut Self {
        self.params.session = Some(session.into());
        self
    }

    pub fn params(&self) -> &ObjectDetectionParams {
        &self.params
    }

    /// Detect object regions in an encoded image
    pub fn detect(
        &mut self,
        image: impl Into<Vec<u8>>,
    ) -> impl Future<Output = Result<ResultEnvelope<DetectResponse>>> + Send + 'static {
        let params = mem::take(&mut self.params);
        let image = image.into();
        let repository = Arc::clone(&self.repository);
        async move { repository.find_regions(image, params).await }
    }
}
