//! SeasonSync - Keep season progress and provider metadata in step
//!
//! This library holds the pure core that sits between a tracking provider
//! (trakt) and a metadata provider (tvdb/tmdb): season identities, the choice
//! of progress granularity and presentation surface, and the reconciliation
//! of ratings and translations into one deduplicated view per season.
//!
//! Nothing in here performs network or storage I/O on provider data. Fetching
//! is left to the caller, which hands already-resolved records in.

mod bundle;
mod identity;
mod metadata;
mod progress;
mod settings;
mod surface;

// Re-export error types
pub use bundle::BundleError;
pub use identity::IdentityError;
pub use metadata::ReconcileError;
pub use settings::SettingsError;
pub use surface::SurfaceError;

pub use bundle::SeasonBundle;
pub use identity::{SeasonIdentity, SeasonIds, TraktId};
pub use metadata::{RatingRecord, ReconciledSeason, SecondaryRef, TranslationRecord, reconcile};
pub use progress::{ContentDescriptor, ProgressGranularity, TrackingPolicy, classify};
pub use settings::Settings;
pub use surface::{IconAction, InteractionContext, Invocation, SurfaceKind, select_surface};

use std::path::Path;
use thiserror::Error;

/// Top-level error type for SeasonSync operations
#[derive(Debug, Error)]
pub enum SeasonSyncError {
    /// Malformed season identity
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Surface could not be selected
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    /// Records could not be reconciled
    #[error("Reconcile error: {0}")]
    Reconcile(#[from] ReconcileError),

    /// Bundle could not be loaded
    #[error("Bundle error: {0}")]
    Bundle(#[from] BundleError),

    /// Settings could not be loaded or stored
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// A result could not be rendered as JSON
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Loads a season bundle from a JSON file and reconciles it
///
/// # Examples
///
/// ```no_run
/// use season_sync::reconcile_file;
/// use std::path::Path;
///
/// let season = reconcile_file(Path::new("season.json")).unwrap();
/// for rating in &season.ratings {
///     println!("{} ({})", rating.name, rating.country);
/// }
/// ```
pub fn reconcile_file(path: &Path) -> Result<ReconciledSeason, SeasonSyncError> {
    let bundle = SeasonBundle::load(path)?;
    log::debug!(
        "Loaded bundle for {} with {} rating(s) and {} translation(s)",
        bundle.identity,
        bundle.ratings.len(),
        bundle.translations.len()
    );

    Ok(bundle.reconcile()?)
}
