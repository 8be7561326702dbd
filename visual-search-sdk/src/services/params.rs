//! Request parameter snapshots
//!
//! Each terminal action turns its builder's scratch state into one of these
//! values. Fields are only readable from outside the crate, so a snapshot
//! cannot change once it has been taken.

use std::collections::HashMap;

/// Search area around a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geolocation {
    pub lat: f64,
    pub lon: f64,
    /// Radius in meters
    pub distance: u32,
}

impl Geolocation {
    pub fn new(lat: f64, lon: f64, distance: u32) -> Self {
        Self { lat, lon, distance }
    }
}

/// Parameters of an image matching request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageMatchingParams {
    pub(crate) limit: Option<u32>,
    pub(crate) language: Option<String>,
    pub(crate) threshold: Option<f32>,
    pub(crate) geolocation: Option<Geolocation>,
    pub(crate) filters: HashMap<String, Vec<String>>,
    pub(crate) session: Option<String>,
}

impl ImageMatchingParams {
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn threshold(&self) -> Option<f32> {
        self.threshold
    }

    pub fn geolocation(&self) -> Option<Geolocation> {
        self.geolocation
    }

    pub fn filters(&self) -> &HashMap<String, Vec<String>> {
        &self.filters
    }

    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }
}

/// Parameters of an object detection request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectDetectionParams {
    pub(crate) session: Option<String>,
}

impl ObjectDetectionParams {
    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }
}

/// Parameters of a SKU matching request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkuMatchingParams {
    pub(crate) limit: Option<u32>,
    pub(crate) language: Option<String>,
    pub(crate) threshold: Option<f32>,
    pub(crate) session: Option<String>,
}

impl SkuMatchingParams {
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn threshold(&self) -> Option<f32> {
        self.threshold
    }

    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }
}

/// Parameters of a feedback request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackParams {
    pub(crate) request_id: Option<String>,
    pub(crate) session: Option<String>,
}

impl FeedbackParams {
    /// Id of the matching request the feedback refers to
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }
}
