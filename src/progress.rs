//! Progress classification
//!
//! Decides whether watch progress for a piece of content is tracked for the
//! show as a whole or per season.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity at which watch progress is tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressGranularity {
    /// Progress of the entire show
    Show,
    /// Progress of an individual season
    Season,
}

impl ProgressGranularity {
    /// The tag used in settings and output
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressGranularity::Show => "show",
            ProgressGranularity::Season => "season",
        }
    }
}

impl fmt::Display for ProgressGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes the structure of a title as far as progress tracking cares
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDescriptor {
    /// Number of seasons the title is split into; `None` for unstructured
    /// content such as movies or shows without season data
    #[serde(default)]
    pub season_count: Option<usize>,
}

impl ContentDescriptor {
    /// Content with no season structure
    pub fn unstructured() -> Self {
        Self { season_count: None }
    }

    /// Content split into `season_count` seasons
    pub fn with_seasons(season_count: usize) -> Self {
        Self {
            season_count: Some(season_count),
        }
    }

    /// True if the title is organised into at least one season
    pub fn has_seasons(&self) -> bool {
        matches!(self.season_count, Some(count) if count > 0)
    }
}

/// Caller's tracking policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingPolicy {
    /// Track progress per season when the content supports it
    pub season_granularity: bool,
}

impl Default for TrackingPolicy {
    fn default() -> Self {
        Self {
            season_granularity: true,
        }
    }
}

/// Classifies the progress granularity for a piece of content.
///
/// A single-season show is still classified as `Season` under a season-aware
/// policy; the count never collapses the result to `Show`.
pub fn classify(content: &ContentDescriptor, policy: &TrackingPolicy) -> ProgressGranularity {
    let granularity = if policy.season_granularity && content.has_seasons() {
        ProgressGranularity::Season
    } else {
        ProgressGranularity::Show
    };

    log::debug!(
        "Classified content with {:?} season(s) as {} (season-aware: {})",
        content.season_count,
        granularity,
        policy.season_granularity
    );

    granularity
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEASON_AWARE: TrackingPolicy = TrackingPolicy {
        season_granularity: true,
    };
    const SHOW_ONLY: TrackingPolicy = TrackingPolicy {
        season_granularity: false,
    };

    #[test]
    fn test_seasons_follow_policy() {
        let content = ContentDescriptor::with_seasons(4);
        assert_eq!(classify(&content, &SEASON_AWARE), ProgressGranularity::Season);
        assert_eq!(classify(&content, &SHOW_ONLY), ProgressGranularity::Show);
    }

    #[test]
    fn test_single_season_stays_season() {
        let content = ContentDescriptor::with_seasons(1);
        assert_eq!(classify(&content, &SEASON_AWARE), ProgressGranularity::Season);
    }

    #[test]
    fn test_unstructured_content_is_show() {
        assert_eq!(
            classify(&ContentDescriptor::unstructured(), &SEASON_AWARE),
            ProgressGranularity::Show
        );
        assert_eq!(
            classify(&ContentDescriptor::with_seasons(0), &SEASON_AWARE),
            ProgressGranularity::Show
        );
    }

    #[test]
    fn test_classify_is_deterministic() {
        let content = ContentDescriptor::with_seasons(2);
        let first = classify(&content, &SEASON_AWARE);
        for _ in 0..10 {
            assert_eq!(classify(&content, &SEASON_AWARE), first);
        }
    }

    #[test]
    fn test_granularity_tags() {
        assert_eq!(
            serde_json::to_string(&ProgressGranularity::Season).unwrap(),
            r#""season""#
        );
        let show: ProgressGranularity = serde_json::from_str(r#""show""#).unwrap();
        assert_eq!(show, ProgressGranularity::Show);
        assert!(serde_json::from_str::<ProgressGranularity>(r#""episode""#).is_err());
    }

    #[test]
    fn test_policy_defaults_to_season_aware() {
        let policy: TrackingPolicy = serde_json::from_str("{}").unwrap();
        assert!(policy.season_granularity);
    }
}
