//! Rule-weighted scoring for Cartaz event candidates.
//!
//! The scorer applies a fixed rule set to one (user, event) pair: each rule
//! contributes its weight independently when it matches, and a small uniform
//! jitter diversifies otherwise-equal candidates. Weights are deliberately
//! coarse and additive so new rules can be added without renormalising the
//! existing ones. The random source is injected through the
//! [`Scorer`](cartaz_core::Scorer) trait, keeping jitter reproducible under
//! a fixed seed and disabled entirely when `jitter_span` is zero.
//!
//! # Examples
//!
//! ```
//! use cartaz_core::{EventCandidate, EventFeatures, Scorer, UserProfile, UserSignals};
//! use cartaz_scorer::{RuleScorer, RuleWeights};
//!
//! let now = "2026-08-07T12:00:00Z".parse().expect("valid timestamp");
//! let starts_at = "2026-08-10T21:00:00Z".parse().expect("valid timestamp");
//! let profile = UserProfile::new("u-1").with_interests(r#"["rock"]"#);
//! let event = EventCandidate::new("ev-1", "Noite de Rock", "music", starts_at)
//!     .with_tags(r#"["rock"]"#);
//!
//! let signals = UserSignals::derive(&profile, Vec::new());
//! let features = EventFeatures::derive(&event, now);
//!
//! let weights = RuleWeights { jitter_span: 0.0, ..RuleWeights::default() };
//! let scorer = RuleScorer::with_weights(weights).expect("valid weights");
//! let mut rng = rand::thread_rng();
//!
//! let breakdown = scorer.score(&features, &signals, &mut rng);
//! assert_eq!(breakdown.total, 40.0); // interest match plus recency
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use rand::{Rng, RngCore};
use thiserror::Error;

use cartaz_core::{EventFeatures, RuleKind, ScoreBreakdown, Scorer, UserSignals};

/// Events starting within this many whole days count as imminent.
const RECENCY_WINDOW_DAYS: i64 = 7;

/// Tunable weights applied to the scoring rules.
///
/// The defaults are the reference weights, ordered by claimed signal
/// strength: a direct interest match outweighs everything else and the
/// jitter span stays below the smallest rule weight so randomness only
/// breaks ties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleWeights {
    /// Points when event tags intersect the user's interests.
    pub interests: f32,
    /// Points when the event category was purchased before.
    pub history: f32,
    /// Points when the event city matches the user's home city.
    pub location: f32,
    /// Points for editorially featured events.
    pub featured: f32,
    /// Points for events starting within the recency window.
    pub recency: f32,
    /// Upper bound (exclusive) of the uniform jitter; zero disables jitter.
    pub jitter_span: f32,
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            interests: 30.0_f32,
            history: 20.0_f32,
            location: 25.0_f32,
            featured: 15.0_f32,
            recency: 10.0_f32,
            jitter_span: 10.0_f32,
        }
    }
}

impl RuleWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`RuleScorerError::InvalidWeights`] when any value is not
    /// finite or is negative.
    pub fn validate(self) -> Result<Self, RuleScorerError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(RuleScorerError::InvalidWeights)
        }
    }

    const fn is_valid(self) -> bool {
        self.has_finite_values() && self.has_non_negative_values()
    }

    const fn has_finite_values(self) -> bool {
        self.interests.is_finite()
            && self.history.is_finite()
            && self.location.is_finite()
            && self.featured.is_finite()
            && self.recency.is_finite()
            && self.jitter_span.is_finite()
    }

    const fn has_non_negative_values(self) -> bool {
        self.interests >= 0.0_f32
            && self.history >= 0.0_f32
            && self.location >= 0.0_f32
            && self.featured >= 0.0_f32
            && self.recency >= 0.0_f32
            && self.jitter_span >= 0.0_f32
    }

    const fn weight(self, kind: RuleKind) -> f32 {
        match kind {
            RuleKind::Interests => self.interests,
            RuleKind::History => self.history,
            RuleKind::Location => self.location,
            RuleKind::Featured => self.featured,
            RuleKind::Recency => self.recency,
        }
    }
}

/// Errors raised when configuring the rule scorer.
#[derive(Debug, Error)]
pub enum RuleScorerError {
    /// Provided weights were unusable.
    #[error("rule weights must be finite and non-negative")]
    InvalidWeights,
}

/// Scorer applying the fixed rule set with configurable weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleScorer {
    weights: RuleWeights,
}

impl RuleScorer {
    /// Construct a scorer with the reference weights.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a scorer with explicit weights.
    ///
    /// # Errors
    /// Returns [`RuleScorerError::InvalidWeights`] when the weights fail
    /// validation.
    pub fn with_weights(weights: RuleWeights) -> Result<Self, RuleScorerError> {
        Ok(Self {
            weights: weights.validate()?,
        })
    }

    /// Return the configured weights.
    #[must_use]
    pub const fn weights(&self) -> RuleWeights {
        self.weights
    }
}

impl Scorer for RuleScorer {
    #[expect(
        clippy::float_arithmetic,
        reason = "rule scoring sums weighted contributions and jitter"
    )]
    fn score(
        &self,
        event: &EventFeatures,
        signals: &UserSignals,
        rng: &mut dyn RngCore,
    ) -> ScoreBreakdown {
        let mut total = 0.0_f32;
        let mut matched = Vec::new();

        for kind in RuleKind::EVALUATION_ORDER {
            if rule_matches(event, signals, kind) {
                total += self.weights.weight(kind);
                matched.push(kind);
            }
        }
        if self.weights.jitter_span > 0.0_f32 {
            total += rng.gen_range(0.0_f32..self.weights.jitter_span);
        }

        ScoreBreakdown { total, matched }
    }
}

fn rule_matches(event: &EventFeatures, signals: &UserSignals, kind: RuleKind) -> bool {
    match kind {
        RuleKind::Interests => !event.tags.is_disjoint(&signals.interests),
        RuleKind::History => signals.past_categories.contains(&event.category),
        RuleKind::Location => city_matches(&event.city, &signals.home_city),
        RuleKind::Featured => event.is_featured,
        RuleKind::Recency => event.starts_in_days <= RECENCY_WINDOW_DAYS,
    }
}

fn city_matches(event_city: &str, home_city: &str) -> bool {
    if event_city.is_empty() || home_city.is_empty() {
        return false;
    }
    event_city
        .to_lowercase()
        .contains(&home_city.to_lowercase())
}
