//! Scoring rules and the dominant-reason classification.
//!
//! Each rule is a tagged variant carrying its own display text, so the
//! `basedOn` classification switches on variants rather than matching
//! human-readable strings.

use serde::{Deserialize, Serialize};

/// A scoring rule that can match a (user, event) pair.
///
/// # Examples
/// ```
/// use cartaz_core::RuleKind;
///
/// assert_eq!(RuleKind::Interests.reason(), "Corresponde aos teus interesses");
/// assert_eq!(RuleKind::Recency.to_string(), "recency");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Event tags intersect the user's declared interests.
    Interests,
    /// Event category matches a past-purchase category.
    History,
    /// Event city matches the user's home city.
    Location,
    /// The event is editorially featured.
    Featured,
    /// The event starts within the next week.
    Recency,
}

impl RuleKind {
    /// Rules in their fixed evaluation order.
    ///
    /// The order affects only the `reasons` list; rule contributions are
    /// independently additive.
    pub const EVALUATION_ORDER: [Self; 5] = [
        Self::Interests,
        Self::History,
        Self::Location,
        Self::Featured,
        Self::Recency,
    ];

    /// Return the rule as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interests => "interests",
            Self::History => "history",
            Self::Location => "location",
            Self::Featured => "featured",
            Self::Recency => "recency",
        }
    }

    /// Human-readable reason shown to the user when the rule matches.
    ///
    /// The Portuguese copy is the ticketing app's UI text and is preserved
    /// verbatim for output compatibility.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Interests => "Corresponde aos teus interesses",
            Self::History => "Categoria que já assististe antes",
            Self::Location => "Perto da tua localização",
            Self::Featured => "Evento em destaque",
            Self::Recency => "Acontece em breve",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score and matched rules for one (user, event) pair.
///
/// Produced by a [`Scorer`](crate::Scorer) and discarded once ranking has
/// shaped the output. `matched` preserves rule evaluation order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Total score including jitter; always non-negative.
    pub total: f32,
    /// Rules that matched, in evaluation order.
    pub matched: Vec<RuleKind>,
}

impl ScoreBreakdown {
    /// Render the matched rules as user-facing reason strings.
    #[must_use]
    pub fn reasons(&self) -> Vec<String> {
        self.matched
            .iter()
            .map(|kind| kind.reason().to_owned())
            .collect()
    }

    /// Classify the dominant reason for this breakdown.
    #[must_use]
    pub fn based_on(&self) -> BasedOn {
        BasedOn::classify(&self.matched)
    }
}

/// Single-label summary of why a recommendation was produced.
///
/// Used for UI badge text; the priority order is a presentation choice,
/// distinct from the scoring weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasedOn {
    /// An interest tag matched.
    Interests,
    /// The event is near the user's home city.
    Location,
    /// The user attended this category before.
    History,
    /// The event is editorially featured.
    Featured,
    /// No single rule dominated.
    Mixed,
}

impl BasedOn {
    /// Pick the dominant label from the matched rules.
    ///
    /// Priority: interests, then location, then history, then featured;
    /// anything else is `mixed`.
    ///
    /// # Examples
    /// ```
    /// use cartaz_core::{BasedOn, RuleKind};
    ///
    /// let matched = [RuleKind::Featured, RuleKind::Location];
    /// assert_eq!(BasedOn::classify(&matched), BasedOn::Location);
    /// assert_eq!(BasedOn::classify(&[]), BasedOn::Mixed);
    /// ```
    #[must_use]
    pub fn classify(matched: &[RuleKind]) -> Self {
        if matched.contains(&RuleKind::Interests) {
            Self::Interests
        } else if matched.contains(&RuleKind::Location) {
            Self::Location
        } else if matched.contains(&RuleKind::History) {
            Self::History
        } else if matched.contains(&RuleKind::Featured) {
            Self::Featured
        } else {
            Self::Mixed
        }
    }

    /// Return the label as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interests => "interests",
            Self::Location => "location",
            Self::History => "history",
            Self::Featured => "featured",
            Self::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for BasedOn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
