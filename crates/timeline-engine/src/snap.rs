//! Magnetic snapping against timeline landmarks.

use framecut_project_model::ProjectState;

use crate::geometry::TimelineGeometry;

/// Outcome of snapping a candidate clip position.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResolution {
    /// The (possibly adjusted) start time in seconds.
    pub start_time: f64,
    /// Timeline times to draw as alignment guide lines. Never committed
    /// state; purely a visual side channel.
    pub guides: Vec<f64>,
}

/// Collect snap targets for a drag of `dragged_clip_id`: time zero, the
/// playhead, and the start/end edge of every other clip.
pub fn snap_targets(state: &ProjectState, dragged_clip_id: &str) -> Vec<f64> {
    let mut targets = vec![0.0, state.current_time];
    for clip in &state.clips {
        if clip.id == dragged_clip_id {
            continue;
        }
        targets.push(clip.start_time);
        targets.push(clip.end_time());
    }
    targets
}

/// Resolve the candidate position of a dragged clip against `targets`.
///
/// Both the clip's start edge and end edge are considered; the nearest
/// target within the snap radius wins for each, and an end-edge snap
/// overrides a start-edge snap only when it is strictly closer.
pub fn resolve_snap(
    candidate_start: f64,
    duration: f64,
    targets: &[f64],
    geometry: &TimelineGeometry,
) -> SnapResolution {
    let threshold = geometry.snap_threshold_secs();
    let candidate_end = candidate_start + duration;

    let start_hit = nearest_within(candidate_start, targets, threshold);
    let end_hit = nearest_within(candidate_end, targets, threshold);

    let mut start_time = candidate_start;
    let mut guides = Vec::new();

    if let Some((target, _)) = start_hit {
        start_time = target;
        guides.push(target);
    }
    if let Some((target, end_dist)) = end_hit {
        let start_dist = start_hit.map(|(_, d)| d).unwrap_or(f64::INFINITY);
        if end_dist < start_dist {
            start_time = target - duration;
            guides.clear();
            guides.push(target);
        }
    }

    SnapResolution { start_time, guides }
}

fn nearest_within(edge: f64, targets: &[f64], threshold: f64) -> Option<(f64, f64)> {
    targets
        .iter()
        .map(|&t| (t, (t - edge).abs()))
        .filter(|&(_, d)| d < threshold)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
