//! Facade crate for the Cartaz recommendation engine.
//!
//! This crate re-exports the core domain types, the rule-weighted scorer, and
//! the recommendation pipeline, with the optional SQLite catalog exposed
//! behind a feature flag.

#![forbid(unsafe_code)]

pub use cartaz_core::{
    BasedOn, Diagnostics, EventCandidate, EventCatalog, EventFeatures, ProfileStore,
    PurchaseHistory, RecommendError, RecommendRequest, RecommendResponse, Recommendation,
    Recommender, RuleKind, ScoreBreakdown, Scorer, StoreError, UserProfile, UserSignals,
};

#[cfg(feature = "store-sqlite")]
pub use cartaz_core::{SqliteCatalog, SqliteCatalogError};

pub use cartaz_scorer::{RuleScorer, RuleScorerError, RuleWeights};

pub use cartaz_recommender::{RuleRecommender, RuleRecommenderConfig};
