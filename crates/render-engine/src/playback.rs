//! Source synchronization for the live preview loop.

use framecut_project_model::{MediaKind, ProjectState};
use tracing::trace;

use crate::source::SourceBank;

/// Decode drift tolerated before a hard seek, in seconds.
pub const MAX_DRIFT_SECS: f64 = 0.3;

/// Align every source with the playhead.
///
/// For each source with an active clip: route track mute and clip volume,
/// hard-seek when the decode position has drifted more than
/// [`MAX_DRIFT_SECS`] from the clip-relative target, and propagate the
/// play/pause flag. Sources with no active clip are paused. Called once per
/// preview tick; cheap when nothing drifted.
pub fn sync_sources(state: &ProjectState, sources: &mut SourceBank) {
    let now = state.current_time;

    for (asset_id, source) in sources.iter_mut() {
        let active = state
            .active_clips(now)
            .find(|c| &c.asset_id == asset_id)
            .and_then(|c| state.track(&c.track_id).map(|t| (c, t)));

        let Some((clip, track)) = active else {
            source.set_playing(false);
            continue;
        };

        if source.kind() != MediaKind::Image {
            let muted = track.is_muted;
            source.set_volume(if muted {
                0.0
            } else {
                (clip.effects.volume / 100.0).clamp(0.0, 1.0)
            });

            let target = clip.source_time(now);
            if (source.position_secs() - target).abs() > MAX_DRIFT_SECS {
                trace!(asset = %asset_id, target, "resyncing drifted source");
                source.seek(target);
            }
        }

        source.set_playing(state.is_playing);
    }
}
