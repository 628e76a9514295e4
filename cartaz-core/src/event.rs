use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An upcoming event eligible for recommendation.
///
/// Candidates mirror the ticketing backend's row shape: the tag list arrives
/// as JSON-encoded text and the venue city may be absent. Normalisation into
/// [`EventFeatures`](crate::EventFeatures) happens during signal extraction,
/// never here.
///
/// # Examples
/// ```
/// use cartaz_core::EventCandidate;
///
/// let starts_at = "2026-09-01T21:00:00Z".parse().expect("valid timestamp");
/// let event = EventCandidate::new("ev-1", "Noite de Fado", "music", starts_at)
///     .with_tags(r#"["fado","acoustic"]"#)
///     .with_city("Lisboa");
///
/// assert_eq!(event.id, "ev-1");
/// assert!(!event.is_featured);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCandidate {
    /// Unique event identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Category label, e.g. `music` or `comedy`.
    pub category: String,
    /// JSON-encoded tag array as stored, e.g. `["rock","indie"]`.
    #[serde(default)]
    pub tags: Option<String>,
    /// Venue city, absent when the venue is unknown.
    #[serde(default)]
    pub city: Option<String>,
    /// Whether the event is editorially featured.
    #[serde(default)]
    pub is_featured: bool,
    /// Event start instant.
    pub starts_at: DateTime<Utc>,
    /// Opaque remainder of the source record, echoed back verbatim in
    /// recommendations.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl EventCandidate {
    /// Construct a candidate with the required fields only.
    ///
    /// # Examples
    /// ```
    /// use cartaz_core::EventCandidate;
    ///
    /// let starts_at = "2026-09-01T21:00:00Z".parse().expect("valid timestamp");
    /// let event = EventCandidate::new("ev-1", "Noite de Fado", "music", starts_at);
    /// assert!(event.tags.is_none());
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        starts_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            tags: None,
            city: None,
            is_featured: false,
            starts_at,
            payload: serde_json::Value::Null,
        }
    }

    /// Attach the raw JSON tag list while returning `self` for chaining.
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Attach the venue city while returning `self` for chaining.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Mark the candidate as featured.
    #[must_use]
    pub const fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    /// Attach the opaque source-record payload.
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}
