//! The per-frame compositor.
//!
//! One pure function turns a project state, a bank of decode surfaces, and
//! a timestamp into a finished RGBA frame. The preview loop and the export
//! driver both call it, which is what guarantees they agree pixel-for-pixel.

use framecut_project_model::{Clip, MediaKind, ProjectState, TransitionKind};
use tracing::trace;

use crate::blend::composite;
use crate::filter::apply_filters;
use crate::frame::{Frame, Rgba};
use crate::source::SourceBank;
use crate::transform::Affine;
use crate::transition::{transition_fx, ClipRect, TransitionFx, TransitionPhase};

/// Render the project at `timestamp` into a `width`×`height` frame.
///
/// Layer order: clips are drawn back-to-front by descending track index
/// (the last track is the background). Clips on hidden or muted tracks,
/// audio clips, and clips whose source has no image ready are skipped.
pub fn render_frame(
    state: &ProjectState,
    sources: &SourceBank,
    timestamp: f64,
    width: u32,
    height: u32,
) -> Frame {
    let mut frame = Frame::filled(width, height, Rgba::BLACK);

    let mut layers: Vec<(usize, &Clip)> = state
        .active_clips(timestamp)
        .filter_map(|clip| state.track_index(&clip.track_id).map(|i| (i, clip)))
        .filter(|(i, _)| {
            let track = &state.tracks[*i];
            !track.is_hidden && !track.is_muted
        })
        .collect();
    // Stable: ties keep insertion order.
    layers.sort_by(|a, b| b.0.cmp(&a.0));

    for (_, clip) in layers {
        draw_clip(&mut frame, state, sources, clip, timestamp);
    }

    frame
}

fn draw_clip(
    frame: &mut Frame,
    state: &ProjectState,
    sources: &SourceBank,
    clip: &Clip,
    timestamp: f64,
) {
    let Some(asset) = state.asset(&clip.asset_id) else {
        trace!(clip = %clip.id, "skipping clip with dangling asset");
        return;
    };
    if asset.kind == MediaKind::Audio {
        return;
    }
    let Some(image) = sources.get(&asset.id).and_then(|s| s.current_image()) else {
        trace!(clip = %clip.id, "source not ready");
        return;
    };

    let width = frame.width() as f64;
    let height = frame.height() as f64;
    let fx = clip_transition_fx(clip, timestamp, width, height);

    let effects = &clip.effects;
    let alpha = fx.alpha * (effects.opacity / 100.0).clamp(0.0, 1.0);

    // Pixel pass: skipped when fully transparent or degenerate, but the
    // tint and vignette washes below still run (they cover the whole frame
    // independent of the clip's own visibility).
    if alpha > 0.0 {
        draw_clip_pixels(frame, image, effects, &fx, alpha, width, height);
    }

    if effects.tint_intensity > 0.0 {
        draw_tint(frame, effects);
    }
    if effects.vignette > 0.0 {
        draw_vignette(frame, effects.vignette);
    }
}

fn draw_clip_pixels(
    frame: &mut Frame,
    image: &Frame,
    effects: &framecut_project_model::ClipEffects,
    fx: &TransitionFx,
    alpha: f64,
    width: f64,
    height: f64,
) {
    // Center-pivoted stack: transition translate/scale, then the clip's
    // rotation and scale, all about the frame center.
    let (cx, cy) = (width / 2.0, height / 2.0);
    let transform = Affine::translate(cx + fx.translate.0, cy + fx.translate.1)
        .then(&Affine::scale(fx.scale))
        .then(&Affine::rotate_degrees(effects.rotation))
        .then(&Affine::scale(effects.scale))
        .then(&Affine::translate(-cx, -cy));
    let Some(inverse) = transform.inverse() else {
        return; // zero scale: nothing visible
    };

    let filtered = apply_filters(image, effects);

    // Contain-fit: letterboxed, centered, never cropped.
    let (src_w, src_h) = (filtered.width() as f64, filtered.height() as f64);
    if src_w == 0.0 || src_h == 0.0 {
        return;
    }
    let aspect_src = src_w / src_h;
    let aspect_out = width / height;
    let (draw_w, draw_h) = if aspect_src > aspect_out {
        (width, width / aspect_src)
    } else {
        (height * aspect_src, height)
    };
    let draw_x = (width - draw_w) / 2.0;
    let draw_y = (height - draw_h) / 2.0;

    for oy in 0..frame.height() as i64 {
        for ox in 0..frame.width() as i64 {
            let (px, py) = (ox as f64 + 0.5, oy as f64 + 0.5);
            if let Some(rect) = &fx.clip_rect {
                if !rect.contains(px, py) {
                    continue;
                }
            }
            let (ux, uy) = inverse.apply(px, py);
            if ux < draw_x || ux >= draw_x + draw_w || uy < draw_y || uy >= draw_y + draw_h {
                continue;
            }
            let sx = ((ux - draw_x) / draw_w * src_w) as i64;
            let sy = ((uy - draw_y) / draw_h * src_h) as i64;
            let src_px = filtered.get(sx, sy);
            if src_px.a == 0 {
                continue;
            }
            let dst = frame.get(ox, oy);
            frame.set(ox, oy, composite(dst, src_px, alpha, effects.blend_mode));
        }
    }
}

/// Combined entrance and exit effect for a clip at `timestamp`.
fn clip_transition_fx(clip: &Clip, timestamp: f64, width: f64, height: f64) -> TransitionFx {
    let Some(transitions) = &clip.transition else {
        return TransitionFx::NEUTRAL;
    };

    let time_in = timestamp - clip.start_time;
    let time_out = clip.end_time() - timestamp;
    let mut fx = TransitionFx::NEUTRAL;

    let enter = &transitions.transition_in;
    if enter.kind != TransitionKind::None && enter.duration > 0.0 && time_in < enter.duration {
        let progress = (time_in / enter.duration).clamp(0.0, 1.0);
        fx = merge_fx(fx, transition_fx(enter.kind, progress, TransitionPhase::In, width, height));
    }

    let exit = &transitions.transition_out;
    if exit.kind != TransitionKind::None && exit.duration > 0.0 && time_out < exit.duration {
        let progress = (1.0 - time_out / exit.duration).clamp(0.0, 1.0);
        fx = merge_fx(fx, transition_fx(exit.kind, progress, TransitionPhase::Out, width, height));
    }

    fx
}

fn merge_fx(a: TransitionFx, b: TransitionFx) -> TransitionFx {
    TransitionFx {
        alpha: a.alpha * b.alpha,
        translate: (a.translate.0 + b.translate.0, a.translate.1 + b.translate.1),
        scale: a.scale * b.scale,
        clip_rect: match (a.clip_rect, b.clip_rect) {
            (Some(r), Some(s)) => Some(intersect(r, s)),
            (r, None) => r,
            (None, s) => s,
        },
    }
}

fn intersect(a: ClipRect, b: ClipRect) -> ClipRect {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    ClipRect {
        x,
        y,
        w: ((a.x + a.w).min(b.x + b.w) - x).max(0.0),
        h: ((a.y + a.h).min(b.y + b.h) - y).max(0.0),
    }
}

/// Full-frame tint wash: the tint color composited with the overlay
/// operator at `tint_intensity / 100` alpha.
fn draw_tint(frame: &mut Frame, effects: &framecut_project_model::ClipEffects) {
    let Ok(tint) = Rgba::from_hex(&effects.tint) else {
        return; // malformed color: skip the wash
    };
    let alpha = (effects.tint_intensity / 100.0).clamp(0.0, 1.0);
    for y in 0..frame.height() as i64 {
        for x in 0..frame.width() as i64 {
            let dst = frame.get(x, y);
            frame.set(
                x,
                y,
                composite(dst, tint, alpha, framecut_project_model::BlendMode::Overlay),
            );
        }
    }
}

/// Radial darkening toward the frame edges.
///
/// Gradient from half the outer radius to the outer radius, with a
/// three-stop profile: transparent at the inner edge, `v/100` alpha at
/// gradient position `v/100`, opaque black at the outer edge.
fn draw_vignette(frame: &mut Frame, vignette: f64) {
    let width = frame.width() as f64;
    let height = frame.height() as f64;
    let (cx, cy) = (width / 2.0, height / 2.0);
    let outer = width.max(height) / 2.0;
    let inner = outer * 0.5;
    let strength = (vignette / 100.0).clamp(0.0, 1.0);

    for y in 0..frame.height() as i64 {
        for x in 0..frame.width() as i64 {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let t = ((dist - inner) / (outer - inner)).clamp(0.0, 1.0);
            let alpha = vignette_alpha(t, strength);
            if alpha <= 0.0 {
                continue;
            }
            let dst = frame.get(x, y);
            let src = Rgba::new(0, 0, 0, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8);
            frame.set(
                x,
                y,
                composite(dst, src, 1.0, framecut_project_model::BlendMode::Normal),
            );
        }
    }
}

/// Piecewise-linear interpolation through the gradient stops
/// `(0, 0) → (s, s) → (1, 1)` where `s = strength`.
fn vignette_alpha(t: f64, strength: f64) -> f64 {
    let stops = [(0.0, 0.0), (strength, strength), (1.0, 1.0)];
    for pair in stops.windows(2) {
        let ((p0, a0), (p1, a1)) = (pair[0], pair[1]);
        if t <= p1 {
            if p1 - p0 <= f64::EPSILON {
                return a1;
            }
            return a0 + (t - p0) / (p1 - p0) * (a1 - a0);
        }
    }
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SolidColorSource, TestPatternSource};
    use framecut_project_model::{Asset, ClipEffects, ClipTransitions, TransitionSpec};

    fn base_state() -> ProjectState {
        let mut state = ProjectState::new();
        state.assets.push(Asset {
            id: "asset-red".into(),
            name: "red".into(),
            kind: MediaKind::Video,
            source: "test:red".into(),
            duration_secs: 60.0,
        });
        state.assets.push(Asset {
            id: "asset-blue".into(),
            name: "blue".into(),
            kind: MediaKind::Video,
            source: "test:blue".into(),
            duration_secs: 60.0,
        });
        state
    }

    fn clip_on(id: &str, asset: &str, track: &str, start: f64, duration: f64) -> Clip {
        Clip {
            id: id.into(),
            asset_id: asset.into(),
            track_id: track.into(),
            start_time: start,
            offset: 0.0,
            duration,
            name: id.into(),
            effects: ClipEffects::default(),
            transition: None,
        }
    }

    fn bank() -> SourceBank {
        let mut bank = SourceBank::new();
        bank.insert(
            "asset-red",
            Box::new(SolidColorSource::new(16, 9, Rgba::new(255, 0, 0, 255))),
        );
        bank.insert(
            "asset-blue",
            Box::new(SolidColorSource::new(16, 9, Rgba::new(0, 0, 255, 255))),
        );
        bank
    }

    #[test]
    fn test_empty_timeline_renders_black() {
        let state = base_state();
        let frame = render_frame(&state, &SourceBank::new(), 0.0, 16, 9);
        assert_eq!(frame.get(8, 4), Rgba::BLACK);
    }

    #[test]
    fn test_inactive_clip_not_drawn() {
        let mut state = base_state();
        state.clips.push(clip_on("c1", "asset-red", "track-v1", 5.0, 2.0));
        let frame = render_frame(&state, &bank(), 1.0, 16, 9);
        assert_eq!(frame.get(8, 4), Rgba::BLACK);

        // End boundary is exclusive.
        let frame = render_frame(&state, &bank(), 7.0, 16, 9);
        assert_eq!(frame.get(8, 4), Rgba::BLACK);
    }

    #[test]
    fn test_lower_track_index_draws_on_top() {
        let mut state = base_state();
        state.clips.push(clip_on("front", "asset-red", "track-v1", 0.0, 5.0));
        state.clips.push(clip_on("back", "asset-blue", "track-v2", 0.0, 5.0));

        let frame = render_frame(&state, &bank(), 1.0, 16, 9);
        assert_eq!(frame.get(8, 4), Rgba::new(255, 0, 0, 255));
    }

    #[test]
    fn test_hidden_and_muted_tracks_are_skipped() {
        let mut state = base_state();
        state.clips.push(clip_on("front", "asset-red", "track-v1", 0.0, 5.0));
        state.clips.push(clip_on("back", "asset-blue", "track-v2", 0.0, 5.0));
        state.tracks[0].is_hidden = true;

        let frame = render_frame(&state, &bank(), 1.0, 16, 9);
        assert_eq!(frame.get(8, 4), Rgba::new(0, 0, 255, 255));

        state.tracks[1].is_muted = true;
        let frame = render_frame(&state, &bank(), 1.0, 16, 9);
        assert_eq!(frame.get(8, 4), Rgba::BLACK);
    }

    #[test]
    fn test_unready_source_is_skipped() {
        let mut state = base_state();
        state.clips.push(clip_on("c1", "asset-red", "track-v1", 0.0, 5.0));
        // No source registered for asset-red in this bank.
        let frame = render_frame(&state, &SourceBank::new(), 1.0, 16, 9);
        assert_eq!(frame.get(8, 4), Rgba::BLACK);
    }

    #[test]
    fn test_opacity_scales_layer_alpha() {
        let mut state = base_state();
        let mut clip = clip_on("c1", "asset-red", "track-v1", 0.0, 5.0);
        clip.effects.opacity = 50.0;
        state.clips.push(clip);

        let frame = render_frame(&state, &bank(), 1.0, 16, 9);
        let px = frame.get(8, 4);
        assert!(px.r > 120 && px.r < 135); // ~50% red over black
        assert_eq!(px.b, 0);
    }

    #[test]
    fn test_fade_entrance_midpoint() {
        let mut state = base_state();
        let mut clip = clip_on("c1", "asset-red", "track-v1", 0.0, 10.0);
        clip.transition = Some(ClipTransitions {
            transition_in: TransitionSpec {
                kind: TransitionKind::Fade,
                duration: 2.0,
            },
            transition_out: TransitionSpec::default(),
        });
        state.clips.push(clip);

        let frame = render_frame(&state, &bank(), 1.0, 16, 9); // progress 0.5
        let px = frame.get(8, 4);
        assert!(px.r > 120 && px.r < 135);

        // Past the transition window the clip is fully shown.
        let frame = render_frame(&state, &bank(), 5.0, 16, 9);
        assert_eq!(frame.get(8, 4).r, 255);
    }

    #[test]
    fn test_wipe_right_reveals_from_right_edge() {
        let mut state = base_state();
        let mut clip = clip_on("c1", "asset-red", "track-v1", 0.0, 10.0);
        clip.transition = Some(ClipTransitions {
            transition_in: TransitionSpec {
                kind: TransitionKind::WipeRight,
                duration: 2.0,
            },
            transition_out: TransitionSpec::default(),
        });
        state.clips.push(clip);

        let frame = render_frame(&state, &bank(), 1.0, 16, 9); // half visible
        assert_eq!(frame.get(1, 4), Rgba::BLACK); // left half still hidden
        assert_eq!(frame.get(14, 4).r, 255); // right half revealed
    }

    #[test]
    fn test_determinism() {
        let mut state = base_state();
        state.assets.push(Asset {
            id: "asset-pattern".into(),
            name: "pattern".into(),
            kind: MediaKind::Video,
            source: "test:pattern".into(),
            duration_secs: 60.0,
        });
        let mut clip = clip_on("c1", "asset-pattern", "track-v1", 0.0, 10.0);
        clip.effects.rotation = 15.0;
        clip.effects.vignette = 40.0;
        clip.effects.tint_intensity = 25.0;
        state.clips.push(clip);

        let mut bank_a = SourceBank::new();
        bank_a.insert("asset-pattern", Box::new(TestPatternSource::new(16, 9)));
        let mut bank_b = SourceBank::new();
        bank_b.insert("asset-pattern", Box::new(TestPatternSource::new(16, 9)));
        if let Some(s) = bank_a.get_mut("asset-pattern") {
            s.seek(3.0);
        }
        if let Some(s) = bank_b.get_mut("asset-pattern") {
            s.seek(3.0);
        }

        let a = render_frame(&state, &bank_a, 3.0, 16, 9);
        let b = render_frame(&state, &bank_b, 3.0, 16, 9);
        assert_eq!(a, b);
    }

    #[test]
    fn test_vignette_draws_even_when_clip_is_invisible() {
        let mut state = base_state();
        state.assets.push(Asset {
            id: "asset-white".into(),
            name: "white".into(),
            kind: MediaKind::Video,
            source: "test:white".into(),
            duration_secs: 60.0,
        });
        state.clips.push(clip_on("back", "asset-white", "track-v2", 0.0, 5.0));
        let mut front = clip_on("front", "asset-red", "track-v1", 0.0, 5.0);
        front.effects.opacity = 0.0;
        front.effects.vignette = 100.0;
        state.clips.push(front);

        let mut bank = bank();
        bank.insert(
            "asset-white",
            Box::new(SolidColorSource::new(16, 9, Rgba::WHITE)),
        );

        let frame = render_frame(&state, &bank, 1.0, 16, 9);
        // The faded-out clip contributes no pixels of its own...
        assert_eq!(frame.get(8, 4), Rgba::WHITE);
        // ...but its vignette still darkens the corners of the backdrop.
        let corner = frame.get(0, 0);
        assert!(corner.r < 255 && corner.g < 255 && corner.b < 255);
    }

    #[test]
    fn test_audio_clips_never_draw() {
        let mut state = base_state();
        state.assets.push(Asset {
            id: "asset-audio".into(),
            name: "song".into(),
            kind: MediaKind::Audio,
            source: "test:audio".into(),
            duration_secs: 60.0,
        });
        state.clips.push(clip_on("c1", "asset-audio", "track-a1", 0.0, 5.0));
        let frame = render_frame(&state, &bank(), 1.0, 16, 9);
        assert_eq!(frame.get(8, 4), Rgba::BLACK);
    }
}
