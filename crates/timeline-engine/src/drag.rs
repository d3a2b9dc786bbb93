//! The drag-to-move gesture session.

use framecut_project_model::{Action, ClipPatch, ProjectState};
use tracing::trace;

use crate::geometry::TimelineGeometry;
use crate::snap::{resolve_snap, snap_targets};

/// Pointer travel below this many pixels means the gesture was a click.
const CLICK_THRESHOLD_PX: f64 = 3.0;

/// Result of finishing a drag session.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// The pointer barely moved: treat as a selection click.
    Click { clip_id: String },
    /// A real move: the patch to dispatch.
    Move(Action),
}

/// An in-flight drag of one clip.
///
/// Owned state machine: `begin` → `update`* → `commit`/`cancel`. The session
/// holds the candidate position; nothing reaches the store until `commit`.
#[derive(Debug, Clone)]
pub struct DragSession {
    clip_id: String,
    origin_track_id: String,
    duration: f64,
    /// Pointer-to-left-edge distance at grab time, in seconds.
    grab_offset_secs: f64,
    start_px: f64,
    start_py: f64,
    candidate_start: f64,
    candidate_track_id: String,
    guides: Vec<f64>,
    moved: bool,
}

impl DragSession {
    /// Start dragging `clip_id` from pointer position `(px, py)`.
    ///
    /// Returns `None` if the clip does not exist or its track is locked.
    pub fn begin(
        state: &ProjectState,
        clip_id: &str,
        px: f64,
        py: f64,
        geometry: &TimelineGeometry,
    ) -> Option<Self> {
        let clip = state.clip(clip_id)?;
        let track = state.track(&clip.track_id)?;
        if track.is_locked {
            return None;
        }
        let grab_offset_secs = geometry.px_to_secs(px) - clip.start_time;
        Some(Self {
            clip_id: clip.id.clone(),
            origin_track_id: clip.track_id.clone(),
            duration: clip.duration,
            grab_offset_secs,
            start_px: px,
            start_py: py,
            candidate_start: clip.start_time,
            candidate_track_id: clip.track_id.clone(),
            guides: Vec::new(),
            moved: false,
        })
    }

    /// Track the pointer: recompute the candidate track row and start time,
    /// applying snapping when enabled.
    pub fn update(
        &mut self,
        state: &ProjectState,
        px: f64,
        py: f64,
        snapping_enabled: bool,
        geometry: &TimelineGeometry,
    ) {
        if (px - self.start_px).abs() > CLICK_THRESHOLD_PX
            || (py - self.start_py).abs() > CLICK_THRESHOLD_PX
        {
            self.moved = true;
        }

        let raw_start = (geometry.px_to_secs(px) - self.grab_offset_secs).max(0.0);
        if snapping_enabled {
            let targets = snap_targets(state, &self.clip_id);
            let snapped = resolve_snap(raw_start, self.duration, &targets, geometry);
            self.candidate_start = snapped.start_time.max(0.0);
            self.guides = snapped.guides;
        } else {
            self.candidate_start = raw_start;
            self.guides.clear();
        }

        self.candidate_track_id = self.resolve_track(state, py, geometry);
        trace!(
            clip = %self.clip_id,
            start = self.candidate_start,
            track = %self.candidate_track_id,
            "drag update"
        );
    }

    /// The row under the pointer, falling back to the origin track when the
    /// target is locked or cannot accept the clip's media kind.
    fn resolve_track(&self, state: &ProjectState, py: f64, geometry: &TimelineGeometry) -> String {
        let Some(row) = geometry.row_at(py, state.tracks.len()) else {
            return self.origin_track_id.clone();
        };
        let target = &state.tracks[row];
        if target.is_locked {
            return self.origin_track_id.clone();
        }
        let asset = state
            .clip(&self.clip_id)
            .and_then(|c| state.asset(&c.asset_id));
        let compatible = match asset {
            Some(asset) => asset.kind.compatible_with_track(target.kind),
            // Dangling asset reference: only same-kind moves are safe.
            None => state.track(&self.origin_track_id).map(|t| t.kind) == Some(target.kind),
        };
        if compatible {
            target.id.clone()
        } else {
            self.origin_track_id.clone()
        }
    }

    /// Current candidate start time (for ghost rendering).
    pub fn candidate_start(&self) -> f64 {
        self.candidate_start
    }

    /// Current candidate track (for ghost rendering).
    pub fn candidate_track_id(&self) -> &str {
        &self.candidate_track_id
    }

    /// Active snap guide times.
    pub fn guides(&self) -> &[f64] {
        &self.guides
    }

    /// Id of the dragged clip.
    pub fn clip_id(&self) -> &str {
        &self.clip_id
    }

    /// Finish the gesture.
    pub fn commit(self) -> DragOutcome {
        if !self.moved {
            return DragOutcome::Click {
                clip_id: self.clip_id,
            };
        }
        DragOutcome::Move(Action::UpdateClip {
            clip_id: self.clip_id,
            patch: ClipPatch {
                start_time: Some(self.candidate_start),
                track_id: Some(self.candidate_track_id),
                ..Default::default()
            },
        })
    }

    /// Abandon the gesture; no state change results.
    pub fn cancel(self) {}
}
