use serde::{Deserialize, Serialize};

/// A user's raw profile record as the ticketing backend stores it.
///
/// Declared interests arrive as JSON-encoded text and the home city is
/// nullable; both are tolerated as missing or malformed and normalised into
/// [`UserSignals`](crate::UserSignals) during signal extraction.
///
/// # Examples
/// ```
/// use cartaz_core::UserProfile;
///
/// let profile = UserProfile::new("u-1")
///     .with_interests(r#"["rock","techno"]"#)
///     .with_home_city("Lisboa");
/// assert_eq!(profile.home_city.as_deref(), Some("Lisboa"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique user identifier.
    pub id: String,
    /// JSON-encoded interest tag array as stored, e.g. `["rock","techno"]`.
    #[serde(default)]
    pub interests: Option<String>,
    /// Free-text home city, absent when unknown.
    #[serde(default)]
    pub home_city: Option<String>,
}

impl UserProfile {
    /// Construct a profile with no declared interests or home city.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            interests: None,
            home_city: None,
        }
    }

    /// Attach the raw JSON interest list while returning `self` for chaining.
    #[must_use]
    pub fn with_interests(mut self, interests: impl Into<String>) -> Self {
        self.interests = Some(interests.into());
        self
    }

    /// Attach the home city while returning `self` for chaining.
    #[must_use]
    pub fn with_home_city(mut self, home_city: impl Into<String>) -> Self {
        self.home_city = Some(home_city.into());
        self
    }
}
