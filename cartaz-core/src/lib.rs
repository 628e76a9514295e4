//! Core domain types for the Cartaz recommendation engine.
//!
//! The engine turns raw ticketing records into a ranked, explained list of
//! upcoming events for one user. Raw [`UserProfile`] and [`EventCandidate`]
//! records arrive with loosely-shaped fields (JSON-encoded tag lists,
//! nullable cities); the signal extraction step normalises them into
//! [`UserSignals`] and [`EventFeatures`] so scoring never has to null-check.
//! A [`Scorer`] assigns each pair a [`ScoreBreakdown`], and a [`Recommender`]
//! orders, truncates, and classifies the results.
//!
//! Collaborator lookups (profiles, purchase history, the event catalog) are
//! modelled as read-only store traits so the pipeline stays a pure
//! computation over already-fetched batches.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod event;
mod profile;
mod recommend;
mod rule;
mod scorer;
mod signals;
mod store;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use event::EventCandidate;
pub use profile::UserProfile;
pub use recommend::{
    DEFAULT_LIMIT, Diagnostics, RecommendError, RecommendRequest, RecommendResponse,
    Recommendation, Recommender,
};
pub use rule::{BasedOn, RuleKind, ScoreBreakdown};
pub use scorer::Scorer;
pub use signals::{EventFeatures, UserSignals, parse_tag_list};
pub use store::{EventCatalog, ProfileStore, PurchaseHistory, StoreError};

#[cfg(feature = "store-sqlite")]
pub use store::{SqliteCatalog, SqliteCatalogError};
