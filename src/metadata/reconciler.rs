//! Metadata reconciliation
//!
//! Merges the ratings and translations fetched from the metadata provider for
//! one season into a deduplicated view keyed by the season's identity. The
//! merge is a pure function over already-fetched data.

use super::{RatingRecord, SecondaryRef, TranslationRecord};
use crate::identity::{SeasonIdentity, SeasonIds};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use thiserror::Error;

/// Errors that can occur during reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// A record belongs to different content than the identity claims
    #[error(
        "Identity mismatch: {record} references {provider} id {found}, but {identity} has {provider} id {expected}"
    )]
    IdentityMismatch {
        identity: SeasonIdentity,
        record: String,
        provider: &'static str,
        expected: u64,
        found: u64,
    },
}

/// A season with its ratings and translations merged and deduplicated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledSeason {
    pub identity: SeasonIdentity,
    /// Sorted by `order`, then `id`
    pub ratings: Vec<RatingRecord>,
    /// Exactly one translation per language
    pub translations: BTreeMap<String, TranslationRecord>,
}

impl ReconciledSeason {
    /// The translation chosen for `language`, if any
    pub fn translation(&self, language: &str) -> Option<&TranslationRecord> {
        self.translations.get(language)
    }

    /// Picks the translation to display.
    ///
    /// Tries the preferred language, then the fallback language, then the
    /// record flagged primary, then the first language in key order.
    pub fn display_translation(
        &self,
        preferred: Option<&str>,
        fallback: &str,
    ) -> Option<&TranslationRecord> {
        preferred
            .and_then(|language| self.translation(language))
            .or_else(|| self.translation(fallback))
            .or_else(|| self.translations.values().find(|t| t.is_primary))
            .or_else(|| self.translations.values().next())
    }

    /// Name of the displayed translation, skipping empty names
    pub fn display_name(&self, preferred: Option<&str>, fallback: &str) -> Option<&str> {
        self.display_translation(preferred, fallback)
            .map(|t| t.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Flattens the season back into raw record sequences.
    pub fn into_records(self) -> (Vec<RatingRecord>, Vec<TranslationRecord>) {
        (self.ratings, self.translations.into_values().collect())
    }
}

/// Reconciles raw provider records for a season.
///
/// Ratings are deduplicated by `id` and sorted by `order` ascending with ties
/// broken by `id`. Among duplicates the record with the lowest `order` is kept,
/// further ties falling back to the full record ordering, so the result does
/// not depend on input order.
///
/// Translations are reduced to one record per language:
/// - a single record flagged primary wins;
/// - with several records flagged primary, the first primary in input order
///   wins and a warning is logged;
/// - with none flagged primary, the first record in input order wins and a
///   warning is logged.
///
/// # Errors
///
/// Returns `IdentityMismatch` if any record embeds a tvdb or tmdb id that
/// differs from the identity's.
pub fn reconcile<R, T>(
    identity: &SeasonIdentity,
    ratings: R,
    translations: T,
) -> Result<ReconciledSeason, ReconcileError>
where
    R: IntoIterator<Item = RatingRecord>,
    T: IntoIterator<Item = TranslationRecord>,
{
    let mut by_id: BTreeMap<u64, RatingRecord> = BTreeMap::new();

    for rating in ratings {
        check_source(identity, rating.source.as_ref(), || {
            format!("rating {}", rating.id)
        })?;

        match by_id.entry(rating.id) {
            Entry::Vacant(slot) => {
                slot.insert(rating);
            }
            Entry::Occupied(mut slot) => {
                log::warn!(
                    "Duplicate rating id {} for {}, keeping the lowest order",
                    rating.id,
                    identity
                );
                if rank(&rating) < rank(slot.get()) {
                    slot.insert(rating);
                }
            }
        }
    }

    let mut merged_ratings: Vec<RatingRecord> = by_id.into_values().collect();
    merged_ratings.sort_by_key(|r| (r.order, r.id));

    // Candidates per language, in input order
    let mut by_language: BTreeMap<String, Vec<TranslationRecord>> = BTreeMap::new();

    for translation in translations {
        check_source(identity, translation.source.as_ref(), || {
            format!("translation '{}'", translation.language)
        })?;

        by_language
            .entry(translation.language.clone())
            .or_default()
            .push(translation);
    }

    let translations = by_language
        .into_iter()
        .filter_map(|(language, candidates)| {
            choose_translation(identity, &language, candidates).map(|chosen| (language, chosen))
        })
        .collect::<BTreeMap<_, _>>();

    log::debug!(
        "Reconciled {}: {} rating(s), {} language(s)",
        identity,
        merged_ratings.len(),
        translations.len()
    );

    Ok(ReconciledSeason {
        identity: *identity,
        ratings: merged_ratings,
        translations,
    })
}

/// Canonical preference among ratings sharing an `id`
fn rank(rating: &RatingRecord) -> (i64, &RatingRecord) {
    (rating.order, rating)
}

/// Selects one translation among the candidates sharing a language
fn choose_translation(
    identity: &SeasonIdentity,
    language: &str,
    candidates: Vec<TranslationRecord>,
) -> Option<TranslationRecord> {
    if candidates.len() > 1 {
        let primaries = candidates.iter().filter(|t| t.is_primary).count();
        if primaries != 1 {
            log::warn!(
                "{} translations for '{}' on {} with {} primary flag(s), keeping the first {}",
                candidates.len(),
                language,
                identity,
                primaries,
                if primaries == 0 { "record" } else { "primary" }
            );
        }
    }

    let mut first = None;
    for candidate in candidates {
        if candidate.is_primary {
            return Some(candidate);
        }
        if first.is_none() {
            first = Some(candidate);
        }
    }
    first
}

/// Verifies the ids a record embeds agree with the identity
fn check_source<F>(
    identity: &SeasonIdentity,
    source: Option<&SecondaryRef>,
    describe: F,
) -> Result<(), ReconcileError>
where
    F: Fn() -> String,
{
    let Some(source) = source else {
        return Ok(());
    };
    let SeasonIds { tvdb, tmdb, .. } = *identity.ids();

    for (provider, expected, found) in [("tvdb", tvdb, source.tvdb), ("tmdb", tmdb, source.tmdb)] {
        if let (Some(expected), Some(found)) = (expected, found) {
            if expected != found {
                return Err(ReconcileError::IdentityMismatch {
                    identity: *identity,
                    record: describe(),
                    provider,
                    expected,
                    found,
                });
            }
        }
    }

    Ok(())
}
