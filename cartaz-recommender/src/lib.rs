//! Recommendation pipeline assembling extraction, scoring, and ranking.
//!
//! [`RuleRecommender`] is generic over the engine boundaries: the profile
//! store, the purchase history, the event catalog, and a relevance scorer.
//! One invocation performs no I/O beyond the injected store lookups, holds no
//! state between calls, and degrades to an empty response when the user is
//! unknown or the catalog has nothing upcoming.

#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cartaz_core::{
    Diagnostics, EventCatalog, EventFeatures, ProfileStore, PurchaseHistory, RecommendError,
    RecommendRequest, RecommendResponse, Recommendation, Recommender, Scorer, UserSignals,
};

/// Configuration for [`RuleRecommender`].
#[derive(Debug, Clone)]
pub struct RuleRecommenderConfig {
    /// Upper bound on candidates fetched from the catalog per request,
    /// keeping scoring cost proportional to one page of upcoming events.
    pub max_candidates: usize,
}

impl Default for RuleRecommenderConfig {
    fn default() -> Self {
        Self {
            max_candidates: 100,
        }
    }
}

/// Recommender ranking catalog candidates with an injected [`Scorer`].
///
/// The pipeline runs in one pass: look the user up, derive
/// [`UserSignals`], fetch upcoming candidates, score each pair, sort by
/// score descending, truncate to the requested page, and classify every
/// surviving candidate. Jitter is driven by a `ChaCha8` stream seeded from
/// the request, so a fixed seed reproduces the full ordering.
pub struct RuleRecommender<P, H, E, S>
where
    P: ProfileStore,
    H: PurchaseHistory,
    E: EventCatalog,
    S: Scorer,
{
    profiles: P,
    history: H,
    catalog: E,
    scorer: S,
    config: RuleRecommenderConfig,
}

impl<P, H, E, S> RuleRecommender<P, H, E, S>
where
    P: ProfileStore,
    H: PurchaseHistory,
    E: EventCatalog,
    S: Scorer,
{
    /// Construct a recommender using default configuration.
    pub fn new(profiles: P, history: H, catalog: E, scorer: S) -> Self {
        Self::with_config(
            profiles,
            history,
            catalog,
            scorer,
            RuleRecommenderConfig::default(),
        )
    }

    /// Construct a recommender with explicit configuration.
    pub const fn with_config(
        profiles: P,
        history: H,
        catalog: E,
        scorer: S,
        config: RuleRecommenderConfig,
    ) -> Self {
        Self {
            profiles,
            history,
            catalog,
            scorer,
            config,
        }
    }
}

impl<P, H, E, S> Recommender for RuleRecommender<P, H, E, S>
where
    P: ProfileStore + Send + Sync,
    H: PurchaseHistory + Send + Sync,
    E: EventCatalog + Send + Sync,
    S: Scorer + Send + Sync,
{
    fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse, RecommendError> {
        request.validate()?;
        let started_at = Instant::now();

        let Some(profile) = self.profiles.find_profile(&request.user_id)? else {
            log::debug!("user {} not found; returning no recommendations", request.user_id);
            return Ok(RecommendResponse::empty(started_at.elapsed()));
        };
        let past_categories = self.history.purchased_categories(&request.user_id)?;
        let signals = UserSignals::derive(&profile, past_categories);

        let candidates = self
            .catalog
            .upcoming_published(request.now, self.config.max_candidates)?;
        if candidates.is_empty() {
            return Ok(RecommendResponse::empty(started_at.elapsed()));
        }
        let candidates_evaluated = candidates.len() as u64;

        let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
        let mut scored: Vec<_> = candidates
            .into_iter()
            .map(|candidate| {
                let features = EventFeatures::derive(&candidate, request.now);
                let breakdown = self.scorer.score(&features, &signals, &mut rng);
                (candidate, breakdown)
            })
            .collect();

        // Stable sort: exact ties keep the catalog's start-date order.
        scored.sort_by(|(_, lhs), (_, rhs)| {
            rhs.total.partial_cmp(&lhs.total).unwrap_or(Ordering::Equal)
        });
        scored.truncate(usize::from(request.limit));

        let recommendations = scored
            .into_iter()
            .enumerate()
            .map(|(index, (event, breakdown))| Recommendation {
                event_id: event.id.clone(),
                score: breakdown.total,
                reasons: if request.include_reasons {
                    breakdown.reasons()
                } else {
                    Vec::new()
                },
                rank: index + 1,
                based_on: breakdown.based_on(),
                event,
            })
            .collect();

        Ok(RecommendResponse {
            recommendations,
            diagnostics: Diagnostics {
                evaluation_time: started_at.elapsed(),
                candidates_evaluated,
            },
        })
    }
}
