//! Property-based tests for the recommendation pipeline.
//!
//! These tests use `proptest` to assert invariants that must hold for all
//! valid inputs, complementing the unit and behaviour suites.
//!
//! # Invariants tested
//!
//! - **Score bounds:** Totals stay inside `[0, 110)` with default weights.
//! - **Monotone ranking:** Scores never increase down the page.
//! - **Rank density:** Ranks are exactly `1..=len` with no gaps.
//! - **Limit compliance:** The page never exceeds the requested limit.
//! - **Graceful degradation:** Signal-free users still receive a full page.
//! - **Reason suppression:** Hiding reasons never changes classification.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use cartaz_core::test_support::MemoryCatalog;
use cartaz_core::{EventCandidate, RecommendRequest, Recommender, UserProfile};
use cartaz_recommender::RuleRecommender;
use cartaz_scorer::RuleScorer;

const CATEGORIES: &[&str] = &["music", "comedy", "sports", "theatre"];
const TAGS: &[&str] = &["rock", "techno", "fado", "jazz"];
const CITIES: &[&str] = &["Lisboa", "Porto", "Faro"];

fn evaluation_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
}

/// Raw ingredients for one synthetic candidate.
#[derive(Debug, Clone)]
struct CandidateSpec {
    category: usize,
    tags: Vec<usize>,
    city: Option<usize>,
    featured: bool,
    days_out: i64,
}

fn candidate_spec() -> impl Strategy<Value = CandidateSpec> {
    (
        0..CATEGORIES.len(),
        proptest::collection::vec(0..TAGS.len(), 0..3),
        proptest::option::of(0..CITIES.len()),
        any::<bool>(),
        0_i64..60,
    )
        .prop_map(|(category, tags, city, featured, days_out)| CandidateSpec {
            category,
            tags,
            city,
            featured,
            days_out,
        })
}

fn build_candidate(index: usize, spec: &CandidateSpec) -> EventCandidate {
    let tag_names: Vec<&str> = spec.tags.iter().map(|&tag| TAGS[tag]).collect();
    let tags_json = serde_json::to_string(&tag_names).expect("serialise tags");
    let starts_at = evaluation_time() + Duration::days(spec.days_out) + Duration::hours(2);

    let mut candidate = EventCandidate::new(
        format!("ev-{index}"),
        format!("Evento {index}"),
        CATEGORIES[spec.category],
        starts_at,
    )
    .with_tags(tags_json);
    if let Some(city) = spec.city {
        candidate = candidate.with_city(CITIES[city]);
    }
    if spec.featured {
        candidate = candidate.featured();
    }
    candidate
}

fn recommender_for(
    profile: UserProfile,
    past_categories: &[&str],
    specs: &[CandidateSpec],
) -> impl Recommender {
    let user_id = profile.id.clone();
    let events = specs
        .iter()
        .enumerate()
        .map(|(index, spec)| build_candidate(index, spec));
    let catalog = Arc::new(
        MemoryCatalog::new()
            .with_profile(profile)
            .with_purchases(user_id, past_categories.iter().copied())
            .with_events(events),
    );
    RuleRecommender::new(
        Arc::clone(&catalog),
        Arc::clone(&catalog),
        catalog,
        RuleScorer::new(),
    )
}

fn warm_profile() -> UserProfile {
    UserProfile::new("u-1")
        .with_interests(r#"["rock","techno"]"#)
        .with_home_city("Lisboa")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: every score stays inside `[0, 110)` with default weights.
    ///
    /// The rule weights sum to 100 and the jitter span is 10, so no pair can
    /// reach 110 and no rule can push a total negative.
    #[test]
    fn scores_stay_within_bounds(
        seed in any::<u64>(),
        specs in proptest::collection::vec(candidate_spec(), 1..30),
    ) {
        let recommender = recommender_for(warm_profile(), &["music"], &specs);
        let request = RecommendRequest::new("u-1")
            .evaluated_at(evaluation_time())
            .with_seed(seed)
            .with_limit(100);

        let response = recommender.recommend(&request).expect("recommend should succeed");
        for recommendation in &response.recommendations {
            prop_assert!(
                (0.0..110.0).contains(&recommendation.score),
                "score {} escaped [0, 110)",
                recommendation.score
            );
            prop_assert!(recommendation.score.is_finite());
        }
    }

    /// Property: scores never increase down the page and ranks are dense.
    #[test]
    fn ranking_is_monotone_and_dense(
        seed in any::<u64>(),
        specs in proptest::collection::vec(candidate_spec(), 1..30),
    ) {
        let recommender = recommender_for(warm_profile(), &["music"], &specs);
        let request = RecommendRequest::new("u-1")
            .evaluated_at(evaluation_time())
            .with_seed(seed)
            .with_limit(100);

        let response = recommender.recommend(&request).expect("recommend should succeed");
        for (index, recommendation) in response.recommendations.iter().enumerate() {
            prop_assert_eq!(recommendation.rank, index + 1);
        }
        for pair in response.recommendations.windows(2) {
            prop_assert!(
                pair[0].score >= pair[1].score,
                "rank {} score {} precedes rank {} score {}",
                pair[0].rank,
                pair[0].score,
                pair[1].rank,
                pair[1].score
            );
        }
    }

    /// Property: the page never exceeds the limit and fills up to it.
    #[test]
    fn limit_is_respected(
        seed in any::<u64>(),
        limit in 1_u16..20,
        specs in proptest::collection::vec(candidate_spec(), 1..30),
    ) {
        let recommender = recommender_for(warm_profile(), &["music"], &specs);
        let request = RecommendRequest::new("u-1")
            .evaluated_at(evaluation_time())
            .with_seed(seed)
            .with_limit(limit);

        let response = recommender.recommend(&request).expect("recommend should succeed");
        let expected = specs.len().min(usize::from(limit));
        prop_assert_eq!(response.recommendations.len(), expected);
    }

    /// Property: a user with no interests, history, or city still receives
    /// every candidate, ranked.
    #[test]
    fn signal_free_users_degrade_gracefully(
        seed in any::<u64>(),
        specs in proptest::collection::vec(candidate_spec(), 1..20),
    ) {
        let recommender = recommender_for(UserProfile::new("u-1"), &[], &specs);
        let request = RecommendRequest::new("u-1")
            .evaluated_at(evaluation_time())
            .with_seed(seed)
            .with_limit(100);

        let response = recommender.recommend(&request).expect("recommend should succeed");
        prop_assert_eq!(response.recommendations.len(), specs.len());
    }

    /// Property: suppressing reasons empties the strings but never changes
    /// the classification or the ordering.
    #[test]
    fn reason_suppression_preserves_classification(
        seed in any::<u64>(),
        specs in proptest::collection::vec(candidate_spec(), 1..20),
    ) {
        let recommender = recommender_for(warm_profile(), &["music"], &specs);
        let base = RecommendRequest::new("u-1")
            .evaluated_at(evaluation_time())
            .with_seed(seed)
            .with_limit(100);

        let shown = recommender.recommend(&base.clone()).expect("recommend should succeed");
        let hidden = recommender
            .recommend(&base.without_reasons())
            .expect("recommend should succeed");

        prop_assert_eq!(shown.recommendations.len(), hidden.recommendations.len());
        for (left, right) in shown.recommendations.iter().zip(&hidden.recommendations) {
            prop_assert_eq!(&left.event_id, &right.event_id);
            prop_assert_eq!(left.based_on, right.based_on);
            prop_assert!(right.reasons.is_empty());
        }
    }
}
