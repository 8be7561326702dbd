//! Capability builders and the repository behind them
//!
//! One request builder per API capability, all sharing a single
//! `ApiRepository` owned by the `VisualSearch` instance.

pub mod detection;
pub mod feedback;
pub mod matching;
pub mod models;
pub mod params;
pub mod recommend;
pub mod repository;
mod common;

pub use common::{encode_options, UserAgent};
pub use detection::ObjectDetectionRequestBuilder;
pub use feedback::{Feedback, FeedbackRequestBuilder, RegionFeedback};
pub use matching::ImageMatchingRequestBuilder;
pub use models::{
    BoundingBox, DetectResponse, DetectedObject, Links, MatchResponse, Offer, PredictedCategory,
    SkuResponse,
};
pub use params::{
    FeedbackParams, Geolocation, ImageMatchingParams, ObjectDetectionParams, SkuMatchingParams,
};
pub use recommend::SkuMatchingRequestBuilder;
pub use repository::ApiRepository;
