//! Entrance and exit transition animations.

use framecut_project_model::TransitionKind;

/// Which end of the clip the transition animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    In,
    Out,
}

/// Axis-aligned clip region in output pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl ClipRect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

/// The compositing adjustments a transition contributes for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFx {
    /// Alpha multiplier in `[0, 1]`.
    pub alpha: f64,
    /// Output-space translation in pixels.
    pub translate: (f64, f64),
    /// Uniform scale factor.
    pub scale: f64,
    /// Optional wipe clip region; pixels outside are dropped.
    pub clip_rect: Option<ClipRect>,
}

impl TransitionFx {
    /// The no-op transition.
    pub const NEUTRAL: TransitionFx = TransitionFx {
        alpha: 1.0,
        translate: (0.0, 0.0),
        scale: 1.0,
        clip_rect: None,
    };
}

/// Compute the transition effect for `kind` at `progress` (clamped to
/// `[0, 1]`) over a `w`×`h` output.
///
/// Visibility convention: an entering clip goes 0 → fully shown as progress
/// runs 0 → 1; an exiting clip goes fully shown → 0. All animation curves
/// are keyed to visibility, so enter and exit are mirror images (zoom-out's
/// exit additionally fades).
pub fn transition_fx(
    kind: TransitionKind,
    progress: f64,
    phase: TransitionPhase,
    w: f64,
    h: f64,
) -> TransitionFx {
    let progress = progress.clamp(0.0, 1.0);
    let visibility = match phase {
        TransitionPhase::In => progress,
        TransitionPhase::Out => 1.0 - progress,
    };
    let hidden = 1.0 - visibility;
    // Entrances come from one side, exits leave through the other.
    let direction = match phase {
        TransitionPhase::In => 1.0,
        TransitionPhase::Out => -1.0,
    };

    let mut fx = TransitionFx::NEUTRAL;
    match kind {
        TransitionKind::None => {}
        TransitionKind::Fade => fx.alpha = visibility,
        TransitionKind::SlideLeft => fx.translate = (direction * w * hidden, 0.0),
        TransitionKind::SlideRight => fx.translate = (-direction * w * hidden, 0.0),
        TransitionKind::SlideUp => fx.translate = (0.0, direction * h * hidden),
        TransitionKind::SlideDown => fx.translate = (0.0, -direction * h * hidden),
        TransitionKind::ZoomIn => fx.scale = visibility,
        TransitionKind::ZoomOut => {
            fx.scale = 2.0 - visibility;
            if phase == TransitionPhase::Out {
                fx.alpha = visibility;
            }
        }
        TransitionKind::WipeLeft => {
            fx.clip_rect = Some(ClipRect {
                x: 0.0,
                y: 0.0,
                w: w * visibility,
                h,
            });
        }
        TransitionKind::WipeRight => {
            fx.clip_rect = Some(ClipRect {
                x: w * (1.0 - visibility),
                y: 0.0,
                w: w * visibility,
                h,
            });
        }
    }
    fx
}
