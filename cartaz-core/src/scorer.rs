//! Score event candidates against a user's signals.
//!
//! The `Scorer` trait assigns a [`ScoreBreakdown`] to an
//! [`EventFeatures`](crate::EventFeatures) given the visitor's
//! [`UserSignals`](crate::UserSignals).

use rand::RngCore;

use crate::{EventFeatures, ScoreBreakdown, UserSignals};

/// Calculate a score and matched rules for one (user, event) pair.
///
/// Higher totals indicate a better match. Implementations must be
/// thread-safe (`Send` + `Sync`) so scorers can run across threads, and
/// infallible: a pair matching no rule still yields a valid, non-negative
/// breakdown. The random source is injected so callers control jitter;
/// implementations without a stochastic component may ignore it.
///
/// Implementations must:
/// - Produce finite (`f32::is_finite`), non-negative totals.
/// - List matched rules in their evaluation order.
///
/// # Examples
///
/// ```rust
/// use cartaz_core::{EventFeatures, ScoreBreakdown, Scorer, UserSignals};
/// use rand::RngCore;
///
/// struct FlatScorer;
///
/// impl Scorer for FlatScorer {
///     fn score(
///         &self,
///         _event: &EventFeatures,
///         _signals: &UserSignals,
///         _rng: &mut dyn RngCore,
///     ) -> ScoreBreakdown {
///         ScoreBreakdown { total: 1.0, matched: Vec::new() }
///     }
/// }
///
/// let now = "2026-08-07T12:00:00Z".parse().expect("valid timestamp");
/// let event = cartaz_core::EventCandidate::new("ev-1", "Noite de Fado", "music", now);
/// let features = EventFeatures::derive(&event, now);
/// let signals = UserSignals::default();
/// let mut rng = rand::thread_rng();
///
/// let breakdown = FlatScorer.score(&features, &signals, &mut rng);
/// assert_eq!(breakdown.total, 1.0);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a breakdown for `event` according to `signals`.
    fn score(
        &self,
        event: &EventFeatures,
        signals: &UserSignals,
        rng: &mut dyn RngCore,
    ) -> ScoreBreakdown;
}
