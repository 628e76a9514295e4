//! Request, response, and error types for the recommendation pipeline.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BasedOn, EventCandidate, StoreError};

/// Page size used when the caller does not specify a limit.
pub const DEFAULT_LIMIT: u16 = 10;

fn default_limit() -> u16 {
    DEFAULT_LIMIT
}

const fn default_include_reasons() -> bool {
    true
}

fn default_now() -> DateTime<Utc> {
    Utc::now()
}

fn default_seed() -> u64 {
    rand::random()
}

/// Parameters for a recommendation request.
///
/// The request captures the target user, the page size, whether reason
/// strings are surfaced, the evaluation instant, and a random seed for
/// reproducible jitter. Fields omitted from a JSON-encoded request take
/// their defaults: a page of [`DEFAULT_LIMIT`], reasons on, the current
/// instant, and a fresh entropy-derived seed.
///
/// # Examples
/// ```rust
/// use cartaz_core::RecommendRequest;
///
/// let request = RecommendRequest::new("u-1").with_limit(5).with_seed(42);
/// assert_eq!(request.limit, 5);
/// assert!(request.include_reasons);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    /// Identifier of the user to recommend for.
    pub user_id: String,
    /// Maximum number of recommendations to return.
    #[serde(default = "default_limit")]
    pub limit: u16,
    /// Whether reason strings are included in the output. Classification is
    /// computed either way.
    #[serde(default = "default_include_reasons")]
    pub include_reasons: bool,
    /// Evaluation instant used for recency features.
    #[serde(default = "default_now")]
    pub now: DateTime<Utc>,
    /// Seed for the jitter component. Reseed per call for natural
    /// diversity; fix it for reproducible ordering.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl RecommendRequest {
    /// Construct a request with default paging, reasons, instant, and seed.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            limit: DEFAULT_LIMIT,
            include_reasons: default_include_reasons(),
            now: default_now(),
            seed: default_seed(),
        }
    }

    /// Set the page size while returning `self` for chaining.
    #[must_use]
    pub const fn with_limit(mut self, limit: u16) -> Self {
        self.limit = limit;
        self
    }

    /// Suppress reason strings in the output.
    #[must_use]
    pub const fn without_reasons(mut self) -> Self {
        self.include_reasons = false;
        self
    }

    /// Force reason strings on, regardless of how the request was built.
    #[must_use]
    pub const fn with_reasons(mut self) -> Self {
        self.include_reasons = true;
        self
    }

    /// Set the evaluation instant while returning `self` for chaining.
    #[must_use]
    pub const fn evaluated_at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Set the jitter seed while returning `self` for chaining.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject requests with an empty user id or a zero limit.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidRequest`] when a parameter is
    /// unusable.
    pub fn validate(&self) -> Result<(), RecommendError> {
        if self.user_id.trim().is_empty() || self.limit == 0 {
            return Err(RecommendError::InvalidRequest);
        }
        Ok(())
    }
}

/// One ranked, explained recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Identifier of the recommended event.
    pub event_id: String,
    /// Final score including jitter.
    pub score: f32,
    /// User-facing reason strings; empty when the caller opted out.
    pub reasons: Vec<String>,
    /// 1-based position within the page.
    pub rank: usize,
    /// Dominant-reason label for UI badges.
    pub based_on: BasedOn,
    /// The full candidate record, echoed back.
    pub event: EventCandidate,
}

/// Measurements captured while serving one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    /// Wall-clock time spent extracting, scoring, and ranking.
    pub evaluation_time: Duration,
    /// Number of candidates scored before truncation.
    pub candidates_evaluated: u64,
}

/// Response from a successful recommendation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    /// Ranked recommendations, best first.
    pub recommendations: Vec<Recommendation>,
    /// Measurements for this run.
    pub diagnostics: Diagnostics,
}

impl RecommendResponse {
    /// Build the empty response returned for unknown users or an empty
    /// catalog. Not an error condition for the caller.
    #[must_use]
    pub const fn empty(evaluation_time: Duration) -> Self {
        Self {
            recommendations: Vec::new(),
            diagnostics: Diagnostics {
                evaluation_time,
                candidates_evaluated: 0,
            },
        }
    }
}

/// Errors returned by [`Recommender::recommend`].
#[derive(Debug, Error)]
pub enum RecommendError {
    /// Request parameters were invalid, e.g. a zero limit.
    #[error("invalid request")]
    InvalidRequest,
    /// A collaborator store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Produce ranked recommendations for one user.
///
/// Implementations should return [`RecommendError::InvalidRequest`] for
/// invalid parameters rather than panicking, and must treat an unknown user
/// or an empty catalog as an empty response. Recommenders must be
/// `Send + Sync` to operate safely across threads.
pub trait Recommender: Send + Sync {
    /// Serve a request, producing a ranked page or an error.
    fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse, RecommendError>;
}
