//! Per-clip visual and audio effect parameters.

use serde::{Deserialize, Serialize};

/// Compositing blend mode for a clip.
///
/// A closed enumeration mapped 1:1 to the standard blend operators; no
/// string passthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

/// The full effect state of a clip.
///
/// An immutable value object: edits replace the whole snapshot (usually via
/// [`EffectPatch::apply_to`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipEffects {
    /// Layer opacity, 0-100.
    pub opacity: f64,
    /// Blur radius in source pixels.
    pub blur: f64,
    /// Grayscale amount, 0-100.
    pub grayscale: f64,
    /// Sepia amount, 0-100.
    pub sepia: f64,
    /// Invert amount, 0-100.
    pub invert: f64,
    /// Brightness, 0-200 (100 = neutral).
    pub brightness: f64,
    /// Contrast, 0-200 (100 = neutral).
    pub contrast: f64,
    /// Uniform scale, 0-5 (1 = neutral).
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Audio volume, 0-100.
    pub volume: f64,
    /// Saturation, 0-200 (100 = neutral).
    pub saturation: f64,
    /// Hue rotation in degrees.
    pub hue_rotate: f64,
    /// Compositing blend mode.
    pub blend_mode: BlendMode,
    /// Vignette strength, 0-100.
    pub vignette: f64,
    /// Tint color as `#rrggbb` hex.
    pub tint: String,
    /// Tint overlay strength, 0-100.
    pub tint_intensity: f64,
}

impl Default for ClipEffects {
    fn default() -> Self {
        Self {
            opacity: 100.0,
            blur: 0.0,
            grayscale: 0.0,
            sepia: 0.0,
            invert: 0.0,
            brightness: 100.0,
            contrast: 100.0,
            scale: 1.0,
            rotation: 0.0,
            volume: 100.0,
            saturation: 100.0,
            hue_rotate: 0.0,
            blend_mode: BlendMode::Normal,
            vignette: 0.0,
            tint: "#6366f1".to_string(),
            tint_intensity: 0.0,
        }
    }
}

/// A partial effect update: unset fields preserve the current value.
///
/// Used both for property edits and for preset application (shallow merge,
/// never a replace).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectPatch {
    pub opacity: Option<f64>,
    pub blur: Option<f64>,
    pub grayscale: Option<f64>,
    pub sepia: Option<f64>,
    pub invert: Option<f64>,
    pub brightness: Option<f64>,
    pub contrast: Option<f64>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
    pub volume: Option<f64>,
    pub saturation: Option<f64>,
    pub hue_rotate: Option<f64>,
    pub blend_mode: Option<BlendMode>,
    pub vignette: Option<f64>,
    pub tint: Option<String>,
    pub tint_intensity: Option<f64>,
}

impl EffectPatch {
    /// Merge this patch over `base`, returning the new effect snapshot.
    pub fn apply_to(&self, base: &ClipEffects) -> ClipEffects {
        ClipEffects {
            opacity: self.opacity.unwrap_or(base.opacity),
            blur: self.blur.unwrap_or(base.blur),
            grayscale: self.grayscale.unwrap_or(base.grayscale),
            sepia: self.sepia.unwrap_or(base.sepia),
            invert: self.invert.unwrap_or(base.invert),
            brightness: self.brightness.unwrap_or(base.brightness),
            contrast: self.contrast.unwrap_or(base.contrast),
            scale: self.scale.unwrap_or(base.scale),
            rotation: self.rotation.unwrap_or(base.rotation),
            volume: self.volume.unwrap_or(base.volume),
            saturation: self.saturation.unwrap_or(base.saturation),
            hue_rotate: self.hue_rotate.unwrap_or(base.hue_rotate),
            blend_mode: self.blend_mode.unwrap_or(base.blend_mode),
            vignette: self.vignette.unwrap_or(base.vignette),
            tint: self.tint.clone().unwrap_or_else(|| base.tint.clone()),
            tint_intensity: self.tint_intensity.unwrap_or(base.tint_intensity),
        }
    }
}
