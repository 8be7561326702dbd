//! Feedback events and the feedback request builder

use std::future::Future;
use std::mem;
use std::sync::Arc;

use serde_json::{json, Value};

use super::params::FeedbackParams;
use super::repository::ApiRepository;
use crate::error::{InvalidArgument, Result};
use crate::result::ResultEnvelope;
use crate::validation::relative_coordinate;

/// A region of interest in relative image coordinates
///
/// Can only be built through [`RegionFeedback::new`], which keeps every
/// field within `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionFeedback {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl RegionFeedback {
    pub fn new(
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> std::result::Result<Self, InvalidArgument> {
        Ok(Self {
            left: relative_coordinate("left", left)?,
            top: relative_coordinate("top", top)?,
            width: relative_coordinate("width", width)?,
            height: relative_coordinate("height", height)?,
        })
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// User feedback about a previous matching result
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    /// The user opened one or more offers
    Click {
        positions: Vec<u32>,
        product_ids: Vec<String>,
    },
    /// The user bought or otherwise converted on one or more offers
    Conversion {
        positions: Vec<u32>,
        product_ids: Vec<String>,
    },
    /// Free-form rating of the result
    Comment {
        success: bool,
        comment: Option<String>,
    },
    /// The region the user actually cared about
    Region(RegionFeedback),
}

impl Feedback {
    /// Build a validated region feedback
    pub fn region(
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> std::result::Result<Self, InvalidArgument> {
        RegionFeedback::new(left, top, width, height).map(Feedback::Region)
    }

    /// Event name on the wire
    pub fn event_name(&self) -> &'static str {
        match self {
            Feedback::Click { .. } => "click",
            Feedback::Conversion { .. } => "conversion",
            Feedback::Comment { .. } => "feedback",
            Feedback::Region(_) => "region",
        }
    }

    /// Event payload on the wire
    pub fn payload(&self) -> Value {
        match self {
            Feedback::Click {
                positions,
                product_ids,
            }
            | Feedback::Conversion {
                positions,
                product_ids,
            } => json!({
                "positions": positions,
                "product_ids": product_ids,
            }),
            Feedback::Comment { success, comment } => match comment {
                Some(comment) => json!({ "success": success, "comment": comment }),
                None => json!({ "success": success }),
            },
            Feedback::Region(region) => json!({
                "rect": {
                    "x": region.left,
                    "y": region.top,
                    "w": region.width,
                    "h": region.height,
                }
            }),
        }
    }
}

/// Builder for feedback requests
///
/// ```no_run
/// # async fn demo(sdk: visual_search_sdk::VisualSearch) -> visual_search_sdk::Result<()> {
/// use visual_search_sdk::Feedback;
///
/// let result = sdk
///     .feedback()
///     .request_id("req-1")
///     .session("session-1")
///     .send(Feedback::region(0.1, 0.1, 0.2, 0.2)?)
///     .await?;
/// assert!(result.is_success());
/// # Ok(())
/// # }
/// ```
pub struct FeedbackRequestBuilder {
    repository: Arc<ApiRepository>,
    params: FeedbackParams,
}

impl FeedbackRequestBuilder {
    pub(crate) fn new(repository: Arc<ApiRepository>) -> Self {
        Self {
            repository,
            params: FeedbackParams::default(),
        }
    }

    /// Id of the matching request this feedback refers to
    pub fn request_id(&mut self, request_id: impl Into<String>) -> &mut Self {
        self.params.request_id = Some(request_id.into());
        self
    }

    pub fn session(&mut self, session: impl Into<String>) -> &mut Self {
        self.params.session = Some(session.into());
        self
    }

    /// Parameters the next `send` would use
    pub fn params(&self) -> &FeedbackParams {
        &self.params
    }

    /// Send one feedback event
    ///
    /// The builder is reset before the returned future is created.
    pub fn send(
        &mut self,
        feedback: Feedback,
    ) -> impl Future<Output = Result<ResultEnvelope<()>>> + Send + 'static {
        let params = mem::take(&mut self.params);
        let repository = Arc::clone(&self.repository);
        async move { repository.send_feedback(feedback, params).await }
    }
}
