//! The pure project state transition function.
//!
//! Every mutation in the editor flows through [`reduce`]. The function is
//! total: invalid inputs produce the unchanged state (no-ops) or clamped
//! values, never errors. Each call returns a fresh state value; the caller
//! owns publication (see [`crate::store::ProjectStore`]).

use crate::action::Action;
use crate::state::{ProjectState, MAX_ZOOM, MIN_ZOOM};

/// Apply `action` to `state`, returning the next state.
pub fn reduce(state: &ProjectState, action: &Action) -> ProjectState {
    match action {
        Action::SetProject(patch) => {
            let mut next = state.clone();
            if let Some(width) = patch.width {
                next.width = width;
            }
            if let Some(height) = patch.height {
                next.height = height;
            }
            if let Some(duration) = patch.duration {
                next.duration = duration.max(0.0);
                next.current_time = next.current_time.min(next.duration);
            }
            if let Some(zoom) = patch.zoom {
                next.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
            }
            next
        }

        Action::AddAsset(asset) => {
            let mut next = state.clone();
            next.assets.push(asset.clone());
            next
        }

        Action::RemoveAsset { asset_id } => {
            let mut next = state.clone();
            next.assets.retain(|a| a.id != *asset_id);
            next
        }

        Action::AddClip(clip) => {
            let mut next = state.clone();
            next.duration = next.duration.max(clip.end_time());
            next.selected_clip_id = Some(clip.id.clone());
            next.clips.push(clip.clone());
            next
        }

        Action::UpdateClip { clip_id, patch } => {
            let mut next = state.clone();
            for clip in &mut next.clips {
                if clip.id == *clip_id {
                    *clip = patch.apply_to(clip);
                }
            }
            next
        }

        Action::RemoveClip { clip_id } => {
            let mut next = state.clone();
            next.clips.retain(|c| c.id != *clip_id);
            if next.selected_clip_id.as_deref() == Some(clip_id.as_str()) {
                next.selected_clip_id = None;
            }
            next
        }

        Action::SetSelection { clip_id } => {
            let mut next = state.clone();
            next.selected_clip_id = clip_id.clone();
            next
        }

        Action::SetPlayhead { time } => {
            let mut next = state.clone();
            next.current_time = time.clamp(0.0, next.duration);
            next
        }

        Action::SetZoom { zoom } => {
            let mut next = state.clone();
            next.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
            next
        }

        Action::TogglePlayback => {
            let mut next = state.clone();
            next.is_playing = !next.is_playing;
            next
        }

        Action::AddTrack { kind } => {
            let mut next = state.clone();
            let ordinal = next.track_count_of(*kind) + 1;
            let prefix = match kind {
                crate::media::MediaKind::Audio => "Audio",
                _ => "Video",
            };
            let id = unique_id(
                &format!("track-{}", next.tracks.len() + 1),
                next.tracks.iter().map(|t| t.id.as_str()),
            );
            next.tracks.push(crate::track::Track::new(
                id,
                format!("{prefix} {ordinal}"),
                *kind,
            ));
            next
        }

        Action::RemoveTrack { track_id } => {
            // The last track can never be removed.
            if state.tracks.len() <= 1 {
                return state.clone();
            }
            let mut next = state.clone();
            next.tracks.retain(|t| t.id != *track_id);
            if next.tracks.len() == state.tracks.len() {
                return next; // unknown id
            }
            // Cascade: no orphaned clips.
            let removed_selection = next
                .clips
                .iter()
                .any(|c| c.track_id == *track_id && Some(&c.id) == next.selected_clip_id.as_ref());
            next.clips.retain(|c| c.track_id != *track_id);
            if removed_selection {
                next.selected_clip_id = None;
            }
            next
        }

        Action::UpdateTrack { track_id, patch } => {
            let mut next = state.clone();
            for track in &mut next.tracks {
                if track.id == *track_id {
                    *track = patch.apply_to(track);
                }
            }
            next
        }

        Action::SplitClip { clip_id, time } => split_clip(state, clip_id, *time),

        Action::Tick { delta } => {
            let mut next = state.clone();
            let new_time = next.current_time + delta.max(0.0);
            if new_time >= next.duration {
                // Hard stop at the end; no loop.
                next.current_time = 0.0;
                next.is_playing = false;
            } else {
                next.current_time = new_time;
            }
            next
        }
    }
}

/// Split `clip_id` at absolute `time`.
///
/// No-op unless `time` lies strictly inside the clip. The left half keeps
/// the original id and start; the right half gets a derived id, starts at
/// `time`, and advances its source offset by the left half's length. Both
/// inherit effects and transitions by value; the right half becomes the
/// selection.
fn split_clip(state: &ProjectState, clip_id: &str, time: f64) -> ProjectState {
    let Some(original) = state.clip(clip_id) else {
        return state.clone();
    };

    let cut = time - original.start_time;
    if cut <= 0.0 || cut >= original.duration {
        return state.clone();
    }

    let mut left = original.clone();
    left.duration = cut;

    let mut right = original.clone();
    right.id = unique_id(
        &format!("{}-split", original.id),
        state.clips.iter().map(|c| c.id.as_str()),
    );
    right.start_time = time;
    right.offset = original.offset + cut;
    right.duration = original.duration - cut;

    let mut next = state.clone();
    next.selected_clip_id = Some(right.id.clone());
    next.clips.retain(|c| c.id != clip_id);
    next.clips.push(left);
    next.clips.push(right);
    next
}

/// Derive an id from `base` that does not collide with `existing`.
///
/// Deterministic so the reducer stays a pure function of its inputs.
fn unique_id<'a>(base: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let taken: Vec<&str> = existing.collect();
    if !taken.contains(&base) {
        return base.to_string();
    }
    let mut n = 2usize;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.iter().any(|id| *id == candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{Clip, ClipTransitions, TransitionKind, TransitionSpec};
    use crate::effects::ClipEffects;
    use crate::media::{Asset, MediaKind};

    fn clip(id: &str, track: &str, start: f64, duration: f64) -> Clip {
        Clip {
            id: id.into(),
            asset_id: "asset-1".into(),
            track_id: track.into(),
            start_time: start,
            offset: 0.0,
            duration,
            name: id.into(),
            effects: ClipEffects::default(),
            transition: None,
        }
    }

    fn asset(id: &str, kind: MediaKind, duration: f64) -> Asset {
        Asset {
            id: id.into(),
            name: id.into(),
            kind,
            source: format!("blob:{id}"),
            duration_secs: duration,
        }
    }

    #[test]
    fn test_add_clip_extends_duration_monotonically() {
        let mut state = ProjectState::new();
        state.duration = 10.0;

        let state = reduce(&state, &Action::AddClip(clip("c1", "track-v1", 2.0, 3.0)));
        assert_eq!(state.duration, 10.0); // 5 < 10, unchanged

        let state = reduce(&state, &Action::AddClip(clip("c2", "track-v1", 8.0, 5.0)));
        assert_eq!(state.duration, 13.0);
        assert_eq!(state.selected_clip_id.as_deref(), Some("c2"));
    }

    #[test]
    fn test_playhead_clamps_to_project_bounds() {
        let state = ProjectState::new();
        let state = reduce(&state, &Action::SetPlayhead { time: -5.0 });
        assert_eq!(state.current_time, 0.0);
        let state = reduce(&state, &Action::SetPlayhead { time: 1e6 });
        assert_eq!(state.current_time, state.duration);
    }

    #[test]
    fn test_zoom_clamps_to_range() {
        let state = ProjectState::new();
        let state = reduce(&state, &Action::SetZoom { zoom: 0.0 });
        assert_eq!(state.zoom, MIN_ZOOM);
        let state = reduce(&state, &Action::SetZoom { zoom: 9999.0 });
        assert_eq!(state.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_remove_last_track_is_noop() {
        let mut state = ProjectState::new();
        state.tracks.truncate(1);
        let track_id = state.tracks[0].id.clone();
        let next = reduce(&state, &Action::RemoveTrack { track_id });
        assert_eq!(next.tracks.len(), 1);
    }

    #[test]
    fn test_remove_track_cascades_to_its_clips_only() {
        let mut state = ProjectState::new();
        state.clips.push(clip("c1", "track-v1", 0.0, 1.0));
        state.clips.push(clip("c2", "track-v2", 0.0, 1.0));

        let next = reduce(
            &state,
            &Action::RemoveTrack {
                track_id: "track-v1".into(),
            },
        );
        assert_eq!(next.tracks.len(), 2);
        assert_eq!(next.clips.len(), 1);
        assert_eq!(next.clips[0].id, "c2");
    }

    #[test]
    fn test_split_rejects_boundary_times() {
        let mut state = ProjectState::new();
        state.clips.push(clip("c1", "track-v1", 2.0, 3.0));

        for t in [2.0, 5.0, 1.0, 6.0] {
            let next = reduce(
                &state,
                &Action::SplitClip {
                    clip_id: "c1".into(),
                    time: t,
                },
            );
            assert_eq!(next.clips.len(), 1, "split at {t} should be a no-op");
        }
    }

    #[test]
    fn test_split_preserves_duration_and_offsets() {
        let mut state = ProjectState::new();
        let mut original = clip("c1", "track-v1", 2.0, 3.0);
        original.offset = 1.5;
        original.transition = Some(ClipTransitions {
            transition_in: TransitionSpec {
                kind: TransitionKind::Fade,
                duration: 0.5,
            },
            transition_out: TransitionSpec::default(),
        });
        state.clips.push(original);

        let next = reduce(
            &state,
            &Action::SplitClip {
                clip_id: "c1".into(),
                time: 3.0,
            },
        );

        assert_eq!(next.clips.len(), 2);
        let left = next.clip("c1").unwrap();
        let right = next
            .clips
            .iter()
            .find(|c| c.id != "c1")
            .unwrap();

        assert!((left.duration - 1.0).abs() < 1e-9);
        assert_eq!(left.start_time, 2.0);

        assert_eq!(right.start_time, 3.0);
        assert!((right.duration - 2.0).abs() < 1e-9);
        assert!((right.offset - 2.5).abs() < 1e-9);

        // Duration-preserving
        assert!((left.duration + right.duration - 3.0).abs() < 1e-9);
        // Effects/transition inherited by value
        assert_eq!(right.transition, left.transition);
        // Right half becomes the selection
        assert_eq!(next.selected_clip_id.as_deref(), Some(right.id.as_str()));
    }

    #[test]
    fn test_split_twice_yields_unique_ids() {
        let mut state = ProjectState::new();
        state.clips.push(clip("c1", "track-v1", 0.0, 10.0));

        let state = reduce(
            &state,
            &Action::SplitClip {
                clip_id: "c1".into(),
                time: 4.0,
            },
        );
        let state = reduce(
            &state,
            &Action::SplitClip {
                clip_id: "c1".into(),
                time: 2.0,
            },
        );

        assert_eq!(state.clips.len(), 3);
        let mut ids: Vec<&str> = state.clips.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_tick_stops_hard_at_end() {
        let mut state = ProjectState::new();
        state.duration = 10.0;
        state.current_time = 9.99;
        state.is_playing = true;

        let next = reduce(&state, &Action::Tick { delta: 0.05 });
        assert!(!next.is_playing);
        assert_eq!(next.current_time, 0.0);
    }

    #[test]
    fn test_tick_advances_before_end() {
        let mut state = ProjectState::new();
        state.duration = 10.0;
        state.current_time = 1.0;
        state.is_playing = true;

        let next = reduce(&state, &Action::Tick { delta: 0.016 });
        assert!(next.is_playing);
        assert!((next.current_time - 1.016).abs() < 1e-9);
    }

    #[test]
    fn test_remove_clip_clears_selection() {
        let mut state = ProjectState::new();
        state.clips.push(clip("c1", "track-v1", 0.0, 1.0));
        state.selected_clip_id = Some("c1".into());

        let next = reduce(
            &state,
            &Action::RemoveClip {
                clip_id: "c1".into(),
            },
        );
        assert!(next.clips.is_empty());
        assert!(next.selected_clip_id.is_none());
    }

    #[test]
    fn test_remove_asset_leaves_clips_in_place() {
        let mut state = ProjectState::new();
        state.assets.push(asset("asset-1", MediaKind::Video, 10.0));
        state.clips.push(clip("c1", "track-v1", 0.0, 5.0));

        let next = reduce(
            &state,
            &Action::RemoveAsset {
                asset_id: "asset-1".into(),
            },
        );
        assert!(next.assets.is_empty());
        assert_eq!(next.clips.len(), 1);
        assert_eq!(next.clips[0].asset_id, "asset-1"); // dangling by design
    }

    #[test]
    fn test_add_track_names_by_kind_count() {
        let state = ProjectState::new();
        let next = reduce(
            &state,
            &Action::AddTrack {
                kind: MediaKind::Video,
            },
        );
        assert_eq!(next.tracks.len(), 4);
        assert_eq!(next.tracks[3].name, "Video 3");

        let next = reduce(
            &next,
            &Action::AddTrack {
                kind: MediaKind::Audio,
            },
        );
        assert_eq!(next.tracks[4].name, "Audio 2");
    }

    #[test]
    fn test_add_track_ids_follow_numbered_scheme() {
        let state = ProjectState::new(); // track-v1, track-v2, track-a1
        let next = reduce(
            &state,
            &Action::AddTrack {
                kind: MediaKind::Video,
            },
        );
        assert_eq!(next.tracks[3].id, "track-4");

        let next = reduce(
            &next,
            &Action::AddTrack {
                kind: MediaKind::Audio,
            },
        );
        assert_eq!(next.tracks[4].id, "track-5");
    }

    #[test]
    fn test_add_track_id_collision_gets_suffix() {
        let mut state = ProjectState::new();
        state
            .tracks
            .push(crate::track::Track::new("track-4", "Video 3", MediaKind::Video));

        let next = reduce(
            &state,
            &Action::AddTrack {
                kind: MediaKind::Video,
            },
        );
        // 4 existing tracks, so the base "track-5" is free.
        assert_eq!(next.tracks[4].id, "track-5");

        state
            .tracks
            .push(crate::track::Track::new("track-6", "Video 4", MediaKind::Video));
        let next = reduce(
            &state,
            &Action::AddTrack {
                kind: MediaKind::Video,
            },
        );
        assert_eq!(next.tracks[5].id, "track-6-2");
    }
}
