//! The closed action vocabulary of the project store.

use serde::{Deserialize, Serialize};

use crate::clip::{Clip, ClipPatch};
use crate::media::{Asset, MediaKind};
use crate::state::ProjectPatch;
use crate::track::TrackPatch;

/// Every mutation the project state supports.
///
/// Contract: no action fails loudly. Invalid inputs are no-ops or are
/// clamped by the reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Merge top-level project settings (canvas size, duration, zoom).
    SetProject(ProjectPatch),

    /// Register a fully resolved asset.
    AddAsset(Asset),

    /// Remove an asset by id. Clips referencing it are left in place.
    RemoveAsset { asset_id: String },

    /// Place a clip. Extends project duration if the clip reaches past it
    /// and selects the new clip.
    AddClip(Clip),

    /// Patch a clip in place.
    UpdateClip { clip_id: String, patch: ClipPatch },

    /// Remove a clip by id, clearing selection if it was selected.
    RemoveClip { clip_id: String },

    /// Select a clip (or clear the selection with `None`).
    SetSelection { clip_id: Option<String> },

    /// Move the playhead; clamped to `[0, duration]`.
    SetPlayhead { time: f64 },

    /// Set timeline zoom; clamped to the valid zoom range.
    SetZoom { zoom: f64 },

    /// Toggle the playback flag.
    TogglePlayback,

    /// Append a new track of the given kind.
    AddTrack { kind: MediaKind },

    /// Remove a track and every clip on it. No-op for the last track.
    RemoveTrack { track_id: String },

    /// Patch a track in place.
    UpdateTrack { track_id: String, patch: TrackPatch },

    /// Split a clip at an absolute timeline time. No-op unless the time is
    /// strictly inside the clip.
    SplitClip { clip_id: String, time: f64 },

    /// Advance the playback clock by a pre-clamped delta in seconds.
    Tick { delta: f64 },
}
