//! Season bundle input
//!
//! A bundle is the JSON document a fetching collaborator hands over: one
//! season identity plus the raw ratings and translations retrieved for it.

use crate::identity::SeasonIdentity;
use crate::metadata::{
    RatingRecord, ReconcileError, ReconciledSeason, TranslationRecord, reconcile,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a bundle
#[derive(Debug, Error)]
pub enum BundleError {
    /// Failed to read the bundle file
    #[error("Failed to read bundle file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not a valid bundle document
    #[error("Failed to parse bundle file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Raw provider data for one season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonBundle {
    pub identity: SeasonIdentity,
    #[serde(default)]
    pub ratings: Vec<RatingRecord>,
    #[serde(default)]
    pub translations: Vec<TranslationRecord>,
}

impl SeasonBundle {
    /// Loads a bundle from a JSON file
    pub fn load(path: &Path) -> Result<Self, BundleError> {
        let content = fs::read_to_string(path).map_err(|e| BundleError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content).map_err(|e| BundleError::ParseFailed {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Parses a bundle from a JSON string
    ///
    /// The identity is validated while parsing, so a negative season number
    /// or an unknown provider key fails here.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Reconciles the bundled records against the bundled identity.
    pub fn reconcile(self) -> Result<ReconciledSeason, ReconcileError> {
        reconcile(&self.identity, self.ratings, self.translations)
    }
}
