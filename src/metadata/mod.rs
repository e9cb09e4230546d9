//! Records supplied by the secondary metadata providers.
//!
//! Ratings and translations mirror the JSON shapes TheTVDB hands out, so the
//! collaborator fetching them can deserialize straight into these types.

mod reconciler;

pub use reconciler::{ReconcileError, ReconciledSeason, reconcile};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Secondary-provider ids a record claims to belong to.
///
/// Only present when the fetching collaborator had richer source data
/// available; used to refuse merging records of the wrong content item.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(deny_unknown_fields)]
pub struct SecondaryRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvdb: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<u64>,
}

/// A content rating (e.g. "TV-MA" in the US) from the metadata provider.
///
/// Ordered field by field, which gives duplicates of one `id` a canonical
/// winner regardless of the order they arrive in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRecord {
    /// Unique within the provider's rating catalog
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub full_name: String,
    /// Display priority among the ratings of one content item
    #[serde(default)]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SecondaryRef>,
}

/// Localized names and text for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    /// Alternate names, order irrelevant
    #[serde(default)]
    pub aliases: BTreeSet<String>,
    #[serde(default)]
    pub is_alias: bool,
    /// Marks the provider's designated primary name
    #[serde(default)]
    pub is_primary: bool,
    /// Locale code, e.g. "eng" or "deu"
    pub language: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SecondaryRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_from_provider_json() {
        let rating: RatingRecord = serde_json::from_str(
            r#"{
                "id": 12,
                "name": "TV-14",
                "country": "usa",
                "contentType": "episode",
                "fullName": "Parents Strongly Cautioned",
                "order": 3
            }"#,
        )
        .unwrap();

        assert_eq!(rating.id, 12);
        assert_eq!(rating.content_type, "episode");
        assert_eq!(rating.full_name, "Parents Strongly Cautioned");
        assert_eq!(rating.description, "");
        assert_eq!(rating.source, None);
    }

    #[test]
    fn test_translation_from_provider_json() {
        let translation: TranslationRecord = serde_json::from_str(
            r#"{
                "aliases": ["B", "A", "B"],
                "isPrimary": true,
                "language": "deu",
                "name": "Staffel 1",
                "source": {"tvdb": 42}
            }"#,
        )
        .unwrap();

        assert_eq!(translation.aliases.len(), 2);
        assert!(translation.is_primary);
        assert!(!translation.is_alias);
        assert_eq!(translation.tagline, "");
        assert_eq!(translation.source.and_then(|s| s.tvdb), Some(42));
    }
}
