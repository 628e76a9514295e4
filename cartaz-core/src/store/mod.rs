//! Read-only collaborator interfaces for profiles, purchase history, and the
//! event catalog.
//!
//! The engine never performs I/O of its own; implementations of these traits
//! own the datastore access and hand back already-fetched batches. The
//! ticket-to-event category join stays on the store side so the engine
//! receives purchase history as a plain category set.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{EventCandidate, UserProfile};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteCatalog, SqliteCatalogError};

/// Errors raised by collaborator stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Preparing or executing a backend query failed.
    #[error("failed to query {operation}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error from the backend.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A stored event carried an unparseable start timestamp.
    #[error("event {id} has an invalid start date")]
    InvalidStartDate {
        /// Identifier of the affected event.
        id: String,
        /// Source error from `chrono`.
        #[source]
        source: chrono::ParseError,
    },
}

/// Look up a user's raw profile record.
pub trait ProfileStore {
    /// Return the profile for `user_id`, or `None` when the user is unknown.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backing store cannot be queried.
    fn find_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;
}

/// Look up the categories a user has previously bought tickets for.
pub trait PurchaseHistory {
    /// Return the deduplicated category set for `user_id`; empty for users
    /// with no purchases.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backing store cannot be queried.
    fn purchased_categories(&self, user_id: &str) -> Result<HashSet<String>, StoreError>;
}

/// Look up upcoming, published event candidates.
pub trait EventCatalog {
    /// Return at most `max_count` published events starting at or after
    /// `now`, ordered by start date ascending.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backing store cannot be queried or a
    /// stored start date does not parse.
    fn upcoming_published(
        &self,
        now: DateTime<Utc>,
        max_count: usize,
    ) -> Result<Vec<EventCandidate>, StoreError>;
}

impl<T> ProfileStore for Arc<T>
where
    T: ProfileStore + ?Sized,
{
    fn find_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        T::find_profile(self, user_id)
    }
}

impl<T> PurchaseHistory for Arc<T>
where
    T: PurchaseHistory + ?Sized,
{
    fn purchased_categories(&self, user_id: &str) -> Result<HashSet<String>, StoreError> {
        T::purchased_categories(self, user_id)
    }
}

impl<T> EventCatalog for Arc<T>
where
    T: EventCatalog + ?Sized,
{
    fn upcoming_published(
        &self,
        now: DateTime<Utc>,
        max_count: usize,
    ) -> Result<Vec<EventCandidate>, StoreError> {
        T::upcoming_published(self, now, max_count)
    }
}
