//! Drop handling for assets and effect presets.

use framecut_project_model::{
    Action, Clip, ClipEffects, ClipPatch, EffectPreset, ProjectState,
};
use tracing::debug;

use crate::geometry::TimelineGeometry;

/// Resolve an asset dropped onto a track at horizontal pixel `pointer_x`.
///
/// Rejections (locked track, unknown ids, media kind mismatch) return
/// `None`; accepted drops return the `AddClip` action, placing the asset's
/// full intrinsic duration at the drop time with default effects.
/// `clip_id` is the caller-allocated id for the new clip.
pub fn drop_asset(
    state: &ProjectState,
    asset_id: &str,
    track_id: &str,
    pointer_x: f64,
    clip_id: impl Into<String>,
    geometry: &TimelineGeometry,
) -> Option<Action> {
    let track = state.track(track_id)?;
    if track.is_locked {
        debug!(track = %track_id, "drop rejected: track locked");
        return None;
    }
    let asset = state.asset(asset_id)?;
    if !asset.kind.compatible_with_track(track.kind) {
        debug!(asset = %asset_id, track = %track_id, "drop rejected: kind mismatch");
        return None;
    }

    let start_time = geometry.px_to_secs(pointer_x).max(0.0);
    Some(Action::AddClip(Clip {
        id: clip_id.into(),
        asset_id: asset.id.clone(),
        track_id: track.id.clone(),
        start_time,
        offset: 0.0,
        duration: asset.duration_secs,
        name: asset.name.clone(),
        effects: ClipEffects::default(),
        transition: None,
    }))
}

/// Resolve an effect preset dropped onto a clip.
///
/// The preset's patch is shallow-merged over the clip's current effects;
/// parameters the preset does not name keep their edited values.
pub fn drop_preset(state: &ProjectState, preset: &EffectPreset, clip_id: &str) -> Option<Action> {
    let clip = state.clip(clip_id)?;
    let merged = preset.patch.apply_to(&clip.effects);
    Some(Action::UpdateClip {
        clip_id: clip.id.clone(),
        patch: ClipPatch {
            effects: Some(merged),
            ..Default::default()
        },
    })
}
