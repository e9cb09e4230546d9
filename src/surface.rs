//! Surface selection
//!
//! Picks the presentation surface (transient popup or persistent panel) that
//! should host progress and status output for an interaction.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during surface selection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The caller did not say how the interaction was started
    #[error("Cannot select a surface: interaction context is unspecified")]
    UnresolvedSurfaceContext,
}

/// What the toolbar icon opens, as persisted in the user's settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconAction {
    #[default]
    Popup,
    Panel,
}

/// Presentation surface hosting the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    /// Transient overlay
    Popup,
    /// Persistent side panel
    Panel,
}

impl From<IconAction> for SurfaceKind {
    fn from(action: IconAction) -> Self {
        match action {
            IconAction::Popup => SurfaceKind::Popup,
            IconAction::Panel => SurfaceKind::Panel,
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceKind::Popup => f.write_str("popup"),
            SurfaceKind::Panel => f.write_str("panel"),
        }
    }
}

/// How the user started the interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "action")]
pub enum Invocation {
    /// A one-off action, e.g. a context menu entry or keyboard shortcut
    TransientAction,
    /// The user opened a workspace they expect to stay open
    PersistentWorkspace,
    /// The toolbar icon was clicked; the configured icon action decides
    IconClick(IconAction),
}

/// Interaction context handed in by the presentation layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionContext {
    #[serde(default)]
    pub invocation: Option<Invocation>,
}

impl InteractionContext {
    /// Context for an explicitly known invocation
    pub fn new(invocation: Invocation) -> Self {
        Self {
            invocation: Some(invocation),
        }
    }
}

/// Selects the surface for the given interaction context.
///
/// # Errors
///
/// Returns `UnresolvedSurfaceContext` when the context carries no invocation.
pub fn select_surface(context: &InteractionContext) -> Result<SurfaceKind, SurfaceError> {
    let invocation = context
        .invocation
        .ok_or(SurfaceError::UnresolvedSurfaceContext)?;

    let surface = match invocation {
        Invocation::TransientAction => SurfaceKind::Popup,
        Invocation::PersistentWorkspace => SurfaceKind::Panel,
        Invocation::IconClick(action) => SurfaceKind::from(action),
    };

    log::debug!("Selected {} surface for {:?}", surface, invocation);

    Ok(surface)
}
