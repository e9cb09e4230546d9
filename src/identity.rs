//! Season identity model
//!
//! A season is identified by its ordinal within the show plus the identifiers
//! the tracking provider (trakt) and the metadata providers (tvdb, tmdb) know
//! it by. Identities are immutable values: any change produces a new instance.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while building or keying a season identity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// The identity is malformed or cannot serve as a lookup key
    #[error("Invalid season identity: {0}")]
    InvalidIdentity(String),
}

/// Identifier of a season on the primary tracking provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraktId(pub u64);

impl fmt::Display for TraktId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cross-provider identifiers of a season.
///
/// Restricted to the three recognised providers; unknown keys are rejected
/// when deserializing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeasonIds {
    /// Primary tracking provider id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trakt: Option<TraktId>,
    /// TheTVDB id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvdb: Option<u64>,
    /// TMDB id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<u64>,
}

impl SeasonIds {
    /// Ids known only to the tracking provider.
    pub fn trakt(id: u64) -> Self {
        Self {
            trakt: Some(TraktId(id)),
            ..Self::default()
        }
    }

    /// Adds the TheTVDB id
    pub fn with_tvdb(mut self, id: u64) -> Self {
        self.tvdb = Some(id);
        self
    }

    /// Adds the TMDB id
    pub fn with_tmdb(mut self, id: u64) -> Self {
        self.tmdb = Some(id);
        self
    }
}

/// A season reference shared between the tracking and metadata domains.
///
/// Two identities are equal when their numbers and all provider ids match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSeasonIdentity")]
pub struct SeasonIdentity {
    number: u32,
    ids: SeasonIds,
}

/// Unvalidated wire shape, funnelled through [`SeasonIdentity::new`].
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSeasonIdentity {
    number: i64,
    #[serde(default)]
    ids: SeasonIds,
}

impl TryFrom<RawSeasonIdentity> for SeasonIdentity {
    type Error = IdentityError;

    fn try_from(raw: RawSeasonIdentity) -> Result<Self, Self::Error> {
        Self::new(raw.number, raw.ids)
    }
}

impl SeasonIdentity {
    /// Creates a season identity.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentity` if `number` is negative or does not fit a
    /// season ordinal.
    pub fn new(number: i64, ids: SeasonIds) -> Result<Self, IdentityError> {
        if number < 0 {
            return Err(IdentityError::InvalidIdentity(format!(
                "season number {} is negative",
                number
            )));
        }

        let number = u32::try_from(number).map_err(|_| {
            IdentityError::InvalidIdentity(format!("season number {} is out of range", number))
        })?;

        Ok(Self { number, ids })
    }

    /// Creates a season identity that is guaranteed to carry a trakt id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentity` for a negative `number` or a missing trakt id.
    pub fn keyed(number: i64, ids: SeasonIds) -> Result<Self, IdentityError> {
        let identity = Self::new(number, ids)?;
        identity.key()?;
        Ok(identity)
    }

    /// The season's ordinal within its show
    pub fn number(&self) -> u32 {
        self.number
    }

    /// The provider ids this season is known by
    pub fn ids(&self) -> &SeasonIds {
        &self.ids
    }

    /// Season 0 conventionally holds specials.
    pub fn is_specials(&self) -> bool {
        self.number == 0
    }

    /// Returns the trakt id used as the canonical lookup key.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentity` if the season has no trakt id.
    pub fn key(&self) -> Result<TraktId, IdentityError> {
        self.ids.trakt.ok_or_else(|| {
            IdentityError::InvalidIdentity(format!(
                "season {} has no trakt id to key on",
                self.number
            ))
        })
    }
}

impl fmt::Display for SeasonIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ids.trakt {
            Some(id) => write!(f, "season {} (trakt {})", self.number, id),
            None => write!(f, "season {}", self.number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_number_is_invalid() {
        let result = SeasonIdentity::new(-1, SeasonIds::trakt(1));
        assert!(matches!(result, Err(IdentityError::InvalidIdentity(_))));
    }

    #[test]
    fn test_out_of_range_number_is_invalid() {
        let result = SeasonIdentity::new(i64::from(u32::MAX) + 1, SeasonIds::default());
        assert!(matches!(result, Err(IdentityError::InvalidIdentity(_))));
    }

    #[test]
    fn test_key_requires_trakt_id() {
        let without = SeasonIdentity::new(2, SeasonIds::default().with_tvdb(10)).unwrap();
        assert!(matches!(
            without.key(),
            Err(IdentityError::InvalidIdentity(_))
        ));

        let bare = SeasonIdentity::new(1, SeasonIds::default()).unwrap();
        assert!(matches!(bare.key(), Err(IdentityError::InvalidIdentity(_))));

        let with = SeasonIdentity::new(2, SeasonIds::trakt(77)).unwrap();
        assert_eq!(with.key(), Ok(TraktId(77)));
    }

    #[test]
    fn test_keyed_rejects_missing_trakt_id() {
        assert!(matches!(
            SeasonIdentity::keyed(1, SeasonIds::default().with_tmdb(3)),
            Err(IdentityError::InvalidIdentity(_))
        ));
        assert!(SeasonIdentity::keyed(1, SeasonIds::trakt(3)).is_ok());
    }

    #[test]
    fn test_equality_is_reflexive_symmetric_transitive() {
        let ids = SeasonIds::trakt(5).with_tvdb(50).with_tmdb(500);
        let a = SeasonIdentity::new(1, ids).unwrap();
        let b = SeasonIdentity::new(1, ids).unwrap();
        let c = SeasonIdentity::new(1, ids).unwrap();

        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_eq!(b, c);
        assert_eq!(a, c);
    }

    #[test]
    fn test_identities_differ_on_number_or_ids() {
        let base = SeasonIdentity::new(1, SeasonIds::trakt(5).with_tvdb(50)).unwrap();
        let other_number = SeasonIdentity::new(2, SeasonIds::trakt(5).with_tvdb(50)).unwrap();
        let other_tvdb = SeasonIdentity::new(1, SeasonIds::trakt(5).with_tvdb(51)).unwrap();
        let missing_tvdb = SeasonIdentity::new(1, SeasonIds::trakt(5)).unwrap();

        assert_ne!(base, other_number);
        assert_ne!(base, other_tvdb);
        assert_ne!(base, missing_tvdb);
    }

    #[test]
    fn test_specials() {
        assert!(SeasonIdentity::new(0, SeasonIds::default()).unwrap().is_specials());
        assert!(!SeasonIdentity::new(3, SeasonIds::default()).unwrap().is_specials());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: SeasonIdentity =
            serde_json::from_str(r#"{"number": 1, "ids": {"trakt": 9, "tvdb": 90}}"#).unwrap();
        assert_eq!(ok.number(), 1);
        assert_eq!(ok.ids().tvdb, Some(90));

        let negative = serde_json::from_str::<SeasonIdentity>(r#"{"number": -1, "ids": {}}"#);
        assert!(negative.is_err());

        let unknown_provider =
            serde_json::from_str::<SeasonIdentity>(r#"{"number": 1, "ids": {"imdb": "tt1"}}"#);
        assert!(unknown_provider.is_err());
    }

    #[test]
    fn test_serialize_round_trips_through_validation() {
        let identity = SeasonIdentity::new(4, SeasonIds::trakt(1).with_tmdb(2)).unwrap();
        let json = serde_json::to_string(&identity).unwrap();
        assert_eq!(json, r#"{"number":4,"ids":{"trakt":1,"tmdb":2}}"#);
        let back: SeasonIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identity);
    }
}
