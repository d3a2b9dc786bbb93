//! Timeline tracks.

use serde::{Deserialize, Serialize};

use crate::media::MediaKind;

/// An ordered compositing layer holding clips of one media kind.
///
/// Track order in [`crate::ProjectState::tracks`] determines stacking:
/// later indices composite first (background), earlier indices draw on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier.
    pub id: String,

    /// Display name ("Video 1", "Audio 2", ...).
    pub name: String,

    /// Media kind accepted by this track.
    pub kind: MediaKind,

    /// Muted tracks contribute neither audio nor video.
    pub is_muted: bool,

    /// Hidden tracks are excluded from the visual pass.
    pub is_hidden: bool,

    /// Locked tracks reject drops and drags.
    pub is_locked: bool,
}

impl Track {
    /// Create an unlocked, visible, audible track.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            is_muted: false,
            is_hidden: false,
            is_locked: false,
        }
    }
}

/// Partial track update; unset fields preserve current values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackPatch {
    pub name: Option<String>,
    pub is_muted: Option<bool>,
    pub is_hidden: Option<bool>,
    pub is_locked: Option<bool>,
}

impl TrackPatch {
    /// Merge this patch over `base`.
    pub fn apply_to(&self, base: &Track) -> Track {
        Track {
            id: base.id.clone(),
            name: self.name.clone().unwrap_or_else(|| base.name.clone()),
            kind: base.kind,
            is_muted: self.is_muted.unwrap_or(base.is_muted),
            is_hidden: self.is_hidden.unwrap_or(base.is_hidden),
            is_locked: self.is_locked.unwrap_or(base.is_locked),
        }
    }
}
