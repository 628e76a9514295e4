//! Test-only, in-memory store implementations used by unit and behaviour
//! tests.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::{
    EventCandidate, EventCatalog, ProfileStore, PurchaseHistory, StoreError, UserProfile,
};

/// In-memory catalog implementing all three store traits.
///
/// Performs linear scans and is intended only for small datasets. The
/// candidate query applies the same published/future contract a real
/// catalog would: events starting before `now` are filtered out and the
/// remainder is sorted by start date ascending.
#[derive(Default, Debug)]
pub struct MemoryCatalog {
    profiles: HashMap<String, UserProfile>,
    purchases: HashMap<String, HashSet<String>>,
    events: Vec<EventCandidate>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user profile while returning `self` for chaining.
    #[must_use]
    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profiles.insert(profile.id.clone(), profile);
        self
    }

    /// Record past-purchase categories for a user.
    #[must_use]
    pub fn with_purchases<I, S>(mut self, user_id: impl Into<String>, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.purchases.insert(
            user_id.into(),
            categories.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Add a single event candidate.
    #[must_use]
    pub fn with_event(mut self, event: EventCandidate) -> Self {
        self.events.push(event);
        self
    }

    /// Add a collection of event candidates.
    #[must_use]
    pub fn with_events<I>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = EventCandidate>,
    {
        self.events.extend(events);
        self
    }
}

impl ProfileStore for MemoryCatalog {
    fn find_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.profiles.get(user_id).cloned())
    }
}

impl PurchaseHistory for MemoryCatalog {
    fn purchased_categories(&self, user_id: &str) -> Result<HashSet<String>, StoreError> {
        Ok(self.purchases.get(user_id).cloned().unwrap_or_default())
    }
}

impl EventCatalog for MemoryCatalog {
    fn upcoming_published(
        &self,
        now: DateTime<Utc>,
        max_count: usize,
    ) -> Result<Vec<EventCandidate>, StoreError> {
        let mut upcoming: Vec<EventCandidate> = self
            .events
            .iter()
            .filter(|event| event.starts_at >= now)
            .cloned()
            .collect();
        upcoming.sort_by_key(|event| event.starts_at);
        upcoming.truncate(max_count);
        Ok(upcoming)
    }
}
