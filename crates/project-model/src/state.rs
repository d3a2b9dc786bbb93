//! The authoritative project state tree.

use serde::{Deserialize, Serialize};

use crate::clip::Clip;
use crate::media::{Asset, MediaKind};
use crate::track::Track;

/// Default timeline zoom in pixels per second.
pub const DEFAULT_ZOOM: f64 = 50.0;
/// Minimum timeline zoom.
pub const MIN_ZOOM: f64 = 0.5;
/// Maximum timeline zoom.
pub const MAX_ZOOM: f64 = 200.0;

/// Default canvas width in pixels.
pub const DEFAULT_PROJECT_WIDTH: u32 = 1920;
/// Default canvas height in pixels.
pub const DEFAULT_PROJECT_HEIGHT: u32 = 1080;
/// Default project duration in seconds (5 minutes).
pub const DEFAULT_DURATION: f64 = 300.0;

/// The aggregate root: everything the editor session knows.
///
/// Mutated exclusively through [`crate::reduce`]; session-scoped, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectState {
    /// Imported media.
    pub assets: Vec<Asset>,

    /// Ordered compositing layers; later index = further back.
    pub tracks: Vec<Track>,

    /// All placed clips, in insertion order.
    pub clips: Vec<Clip>,

    /// Playhead position in seconds, clamped to `[0, duration]`.
    pub current_time: f64,

    /// Total project duration in seconds. Grows when clips extend past it;
    /// never shrinks automatically.
    pub duration: f64,

    /// Whether the playback clock is running.
    pub is_playing: bool,

    /// Timeline zoom in pixels per second.
    pub zoom: f64,

    /// Currently selected clip, if any.
    pub selected_clip_id: Option<String>,

    /// Canvas width in pixels.
    pub width: u32,

    /// Canvas height in pixels.
    pub height: u32,
}

impl ProjectState {
    /// Fresh session state with the default track layout.
    pub fn new() -> Self {
        Self {
            assets: vec![],
            tracks: vec![
                Track::new("track-v1", "Video 1", MediaKind::Video),
                Track::new("track-v2", "Video 2", MediaKind::Video),
                Track::new("track-a1", "Audio 1", MediaKind::Audio),
            ],
            clips: vec![],
            current_time: 0.0,
            duration: DEFAULT_DURATION,
            is_playing: false,
            zoom: DEFAULT_ZOOM,
            selected_clip_id: None,
            width: DEFAULT_PROJECT_WIDTH,
            height: DEFAULT_PROJECT_HEIGHT,
        }
    }

    /// Index of a track in compositing order, if present.
    pub fn track_index(&self, track_id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == track_id)
    }

    /// Look up a track by id.
    pub fn track(&self, track_id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    /// Look up a clip by id.
    pub fn clip(&self, clip_id: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == clip_id)
    }

    /// Look up an asset by id.
    pub fn asset(&self, asset_id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == asset_id)
    }

    /// Clips whose interval contains `time`.
    pub fn active_clips(&self, time: f64) -> impl Iterator<Item = &Clip> {
        self.clips.iter().filter(move |c| c.contains(time))
    }

    /// Count of tracks of a given kind (used for default track naming).
    pub fn track_count_of(&self, kind: MediaKind) -> usize {
        self.tracks.iter().filter(|t| t.kind == kind).count()
    }
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial top-level state update (project settings dialog).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectPatch {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub duration: Option<f64>,
    pub zoom: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_matches_defaults() {
        let state = ProjectState::new();
        assert_eq!(state.tracks.len(), 3);
        assert_eq!(state.tracks[0].kind, MediaKind::Video);
        assert_eq!(state.tracks[2].kind, MediaKind::Audio);
        assert_eq!(state.duration, DEFAULT_DURATION);
        assert_eq!(state.zoom, DEFAULT_ZOOM);
        assert!(!state.is_playing);
        assert!(state.selected_clip_id.is_none());
    }

    #[test]
    fn test_track_index_follows_order() {
        let state = ProjectState::new();
        assert_eq!(state.track_index("track-v1"), Some(0));
        assert_eq!(state.track_index("track-a1"), Some(2));
        assert_eq!(state.track_index("missing"), None);
    }
}
