//! Timeline clips and transitions.

use serde::{Deserialize, Serialize};

use crate::effects::ClipEffects;

/// Kind of entrance/exit transition animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionKind {
    #[default]
    None,
    Fade,
    SlideLeft,
    SlideRight,
    SlideUp,
    SlideDown,
    ZoomIn,
    ZoomOut,
    WipeLeft,
    WipeRight,
}

/// A single transition: kind plus duration in seconds.
///
/// The duration is independent of the clip's own duration and may overlap
/// it; progress is clamped to `[0, 1]` regardless.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub kind: TransitionKind,
    pub duration: f64,
}

/// Entrance and exit transitions attached to a clip.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClipTransitions {
    #[serde(rename = "in")]
    pub transition_in: TransitionSpec,
    #[serde(rename = "out")]
    pub transition_out: TransitionSpec,
}

/// A placed, time-bounded reference to an asset on a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Unique clip identifier.
    pub id: String,

    /// Referenced asset (never owned; may dangle after asset removal).
    pub asset_id: String,

    /// Owning track. Ownership transfers atomically on cross-track drags.
    pub track_id: String,

    /// Timeline position in seconds.
    pub start_time: f64,

    /// Trim-in point within the source asset, in seconds.
    pub offset: f64,

    /// Visible length on the timeline, in seconds. Always > 0.
    pub duration: f64,

    /// Display name.
    pub name: String,

    /// Effect snapshot.
    pub effects: ClipEffects,

    /// Optional entrance/exit transitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<ClipTransitions>,
}

impl Clip {
    /// Timeline time at which this clip ends.
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Whether `time` falls inside the clip's half-open interval
    /// `[start_time, start_time + duration)`.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time < self.end_time()
    }

    /// Source-relative playback time for a given timeline time.
    pub fn source_time(&self, timeline_time: f64) -> f64 {
        (timeline_time - self.start_time) + self.offset
    }
}

/// Partial clip update; unset fields preserve current values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipPatch {
    pub track_id: Option<String>,
    pub start_time: Option<f64>,
    pub offset: Option<f64>,
    pub duration: Option<f64>,
    pub name: Option<String>,
    pub effects: Option<ClipEffects>,
    pub transition: Option<Option<ClipTransitions>>,
}

impl ClipPatch {
    /// Merge this patch over `base`.
    pub fn apply_to(&self, base: &Clip) -> Clip {
        Clip {
            id: base.id.clone(),
            asset_id: base.asset_id.clone(),
            track_id: self
                .track_id
                .clone()
                .unwrap_or_else(|| base.track_id.clone()),
            start_time: self.start_time.unwrap_or(base.start_time),
            offset: self.offset.unwrap_or(base.offset),
            duration: self.duration.unwrap_or(base.duration),
            name: self.name.clone().unwrap_or_else(|| base.name.clone()),
            effects: self
                .effects
                .clone()
                .unwrap_or_else(|| base.effects.clone()),
            transition: self.transition.unwrap_or(base.transition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> Clip {
        Clip {
            id: "clip-1".into(),
            asset_id: "asset-1".into(),
            track_id: "track-v1".into(),
            start_time: 2.0,
            offset: 0.5,
            duration: 3.0,
            name: "shot".into(),
            effects: ClipEffects::default(),
            transition: None,
        }
    }

    #[test]
    fn test_interval_is_half_open() {
        let c = clip();
        assert!(c.contains(2.0));
        assert!(c.contains(4.999));
        assert!(!c.contains(5.0));
        assert!(!c.contains(1.999));
    }

    #[test]
    fn test_source_time_includes_trim() {
        let c = clip();
        assert!((c.source_time(2.0) - 0.5).abs() < 1e-9);
        assert!((c.source_time(4.0) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_patch_can_move_across_tracks() {
        let c = clip();
        let moved = ClipPatch {
            start_time: Some(7.25),
            track_id: Some("track-v2".into()),
            ..Default::default()
        }
        .apply_to(&c);
        assert_eq!(moved.track_id, "track-v2");
        assert_eq!(moved.start_time, 7.25);
        assert_eq!(moved.duration, c.duration);
        assert_eq!(moved.id, c.id);
    }

    #[test]
    fn test_patch_can_clear_transition() {
        let mut c = clip();
        c.transition = Some(ClipTransitions::default());
        let cleared = ClipPatch {
            transition: Some(None),
            ..Default::default()
        }
        .apply_to(&c);
        assert!(cleared.transition.is_none());
    }
}
