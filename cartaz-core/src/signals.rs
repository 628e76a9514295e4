//! Signal extraction: normalise raw profile and event records into the
//! shapes scoring rules consume.
//!
//! Raw records tolerate missing or malformed fields; every parse failure
//! falls back to an empty container so a user with no history and no declared
//! interests still receives recommendations from the remaining signals.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::{EventCandidate, UserProfile};

/// Parse a JSON-encoded tag array, treating absent or malformed input as
/// empty.
///
/// # Examples
/// ```
/// use cartaz_core::parse_tag_list;
///
/// let tags = parse_tag_list(Some(r#"["rock","techno"]"#));
/// assert!(tags.contains("rock"));
///
/// assert!(parse_tag_list(Some("not json")).is_empty());
/// assert!(parse_tag_list(None).is_empty());
/// ```
#[must_use]
pub fn parse_tag_list(raw: Option<&str>) -> HashSet<String> {
    raw.and_then(|value| serde_json::from_str::<Vec<String>>(value).ok())
        .map(|tags| tags.into_iter().collect())
        .unwrap_or_default()
}

/// Normalised per-user signals consumed by scoring rules.
///
/// All fields are present and defaulted at construction, so the scorer never
/// null-checks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserSignals {
    /// Declared interest tags, deduplicated.
    pub interests: HashSet<String>,
    /// Categories of events the user previously bought tickets for.
    pub past_categories: HashSet<String>,
    /// Home city, case preserved; empty when unknown.
    pub home_city: String,
}

impl UserSignals {
    /// Derive signals from a raw profile and the user's past-purchase
    /// categories.
    ///
    /// # Examples
    /// ```
    /// use cartaz_core::{UserProfile, UserSignals};
    ///
    /// let profile = UserProfile::new("u-1")
    ///     .with_interests(r#"["rock"]"#)
    ///     .with_home_city("Lisboa");
    /// let signals = UserSignals::derive(&profile, vec!["music".to_owned()]);
    ///
    /// assert!(signals.interests.contains("rock"));
    /// assert!(signals.past_categories.contains("music"));
    /// assert_eq!(signals.home_city, "Lisboa");
    /// ```
    pub fn derive<I>(profile: &UserProfile, past_categories: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            interests: parse_tag_list(profile.interests.as_deref()),
            past_categories: past_categories
                .into_iter()
                .filter(|category| !category.is_empty())
                .collect(),
            home_city: profile.home_city.clone().unwrap_or_default(),
        }
    }
}

/// Normalised per-event features consumed by scoring rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFeatures {
    /// Category label, as stored.
    pub category: String,
    /// Parsed tag set; empty when the raw list was absent or malformed.
    pub tags: HashSet<String>,
    /// Venue city, case preserved; empty when unknown.
    pub city: String,
    /// Whether the event is editorially featured.
    pub is_featured: bool,
    /// Whole days between evaluation time and the event start.
    pub starts_in_days: i64,
}

impl EventFeatures {
    /// Derive features from a raw candidate at the given evaluation time.
    ///
    /// The day count is the whole-day floor of `starts_at - now`; callers
    /// feed only future-dated candidates, so it is non-negative in practice.
    ///
    /// # Examples
    /// ```
    /// use cartaz_core::{EventCandidate, EventFeatures};
    ///
    /// let now = "2026-08-07T12:00:00Z".parse().expect("valid timestamp");
    /// let starts_at = "2026-08-10T21:00:00Z".parse().expect("valid timestamp");
    /// let event = EventCandidate::new("ev-1", "Noite de Fado", "music", starts_at);
    ///
    /// let features = EventFeatures::derive(&event, now);
    /// assert_eq!(features.starts_in_days, 3);
    /// ```
    #[must_use]
    pub fn derive(candidate: &EventCandidate, now: DateTime<Utc>) -> Self {
        Self {
            category: candidate.category.clone(),
            tags: parse_tag_list(candidate.tags.as_deref()),
            city: candidate.city.clone().unwrap_or_default(),
            is_featured: candidate.is_featured,
            starts_in_days: (candidate.starts_at - now).num_days(),
        }
    }
}
