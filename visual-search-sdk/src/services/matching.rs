//! Image matching request builder

use std::collections::HashMap;
use std::future::Future;
use std::mem;
use std::sync::Arc;

use super::models::MatchResponse;
use super::params::{Geolocation, ImageMatchingParams};
use super::repository::ApiRepository;
use crate::error::Result;
use crate::result::ResultEnvelope;
use crate::validation;

/// Builder for image matching requests
///
/// Setters validate immediately. `match_image` takes a snapshot of the
/// configured parameters and resets the builder before the request starts,
/// so the same builder can be configured for the next request right away.
///
/// ```no_run
/// # use visual_search_sdk::VisualSearch;
/// # async fn demo(sdk: VisualSearch, image: Vec<u8>) -> visual_search_sdk::Result<()> {
/// use visual_search_sdk::ResultEnvelope;
///
/// let result = sdk
///     .image_matching()
///     .limit(5)?
///     .threshold(0.5)?
///     .language("de")
///     .match_image(image)
///     .await?;
///
/// match result {
///     ResultEnvelope::Success(response) => println!("{} offers", response.offers.len()),
///     ResultEnvelope::Failure(error) => eprintln!("matching failed: {}", error),
/// }
/// # Ok(())
/// # }
/// ```
pub struct ImageMatchingRequestBuilder {
    repository: Arc<ApiRepository>,
    params: ImageMatchingParams,
}

impl ImageMatchingRequestBuilder {
    pub(crate) fn new(repository: Arc<ApiRepository>) -> Self {
        Self {
            repository,
            params: ImageMatchingParams::default(),
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

    /// Restrict results to `distance` meters around a point
    pub fn geolocation(&mut self, lat: f64, lon: f64, distance: u32) -> &mut Self {
        self.params.geolocation = Some(Geolocation::new(lat, lon, distance));
        self
    }

    /// Replace all filters
    pub fn filters(&mut self, filters: HashMap<String, Vec<String>>) -> &mut Self {
        self.params.filters = filters;
        self
    }

    /// Add values to a single filter type
    pub fn filter<I, S>(&mut self, filter_type: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params
            .filters
            .entry(filter_type.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn session(&mut self, session: impl Into<String>) -> &mut Self {
        self.params.session = Some(session.into());
        self
    }

    /// Parameters the next `match_image` would use
    pub fn params(&self) -> &ImageMatchingParams {
        &self.params
    }

    /// Match an encoded image against the catalog
    ///
    /// Exactly one request is sent when the returned future is polled.
    pub fn match_image(
        &mut self,
        image: impl Into<Vec<u8>>,
    ) -> impl Future<Output = Result<ResultEnvelope<MatchResponse>>> + Send + 'static {
        let params = mem::take(&mut self.params);
        let image = image.into();
        let repository = Arc::clone(&self.repository);
        async move { repository.find(image, params).await }
    }
}
