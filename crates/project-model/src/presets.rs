//! Built-in effect presets.
//!
//! Presets are plain [`EffectPatch`] values: applying one is a shallow merge
//! over the clip's current effects, so a preset only touches the parameters
//! it names. "Reset All" is the one exception, carrying a full patch back to
//! the neutral defaults.

use serde::Serialize;

use crate::effects::{ClipEffects, EffectPatch};

/// Library grouping for a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PresetCategory {
    Cinematic,
    Vintage,
    Stylize,
    Utility,
}

/// A named, draggable bundle of effect parameters.
///
/// Built-in data, serialized only for diagnostics; ids and names are
/// static.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: PresetCategory,
    pub patch: EffectPatch,
}

/// The built-in preset library, in display order.
pub fn builtin_presets() -> Vec<EffectPreset> {
    vec![
        EffectPreset {
            id: "cine-teal-orange",
            name: "Teal & Orange",
            description: "Blockbuster look",
            category: PresetCategory::Cinematic,
            patch: EffectPatch {
                contrast: Some(120.0),
                saturation: Some(110.0),
                tint: Some("#00a3ff".into()),
                tint_intensity: Some(20.0),
                vignette: Some(30.0),
                ..Default::default()
            },
        },
        EffectPreset {
            id: "cine-noir",
            name: "Film Noir",
            description: "Dark, moody monochrome",
            category: PresetCategory::Cinematic,
            patch: EffectPatch {
                grayscale: Some(100.0),
                contrast: Some(140.0),
                brightness: Some(90.0),
                vignette: Some(60.0),
                ..Default::default()
            },
        },
        EffectPreset {
            id: "cine-dramatic",
            name: "Dramatic Warm",
            description: "Intense warm tones",
            category: PresetCategory::Cinematic,
            patch: EffectPatch {
                contrast: Some(130.0),
                saturation: Some(80.0),
                tint: Some("#ff8c00".into()),
                tint_intensity: Some(30.0),
                vignette: Some(40.0),
                ..Default::default()
            },
        },
        EffectPreset {
            id: "vintage-sepia",
            name: "Classic Sepia",
            description: "Old photo style",
            category: PresetCategory::Vintage,
            patch: EffectPatch {
                sepia: Some(90.0),
                contrast: Some(90.0),
                brightness: Some(95.0),
                vignette: Some(20.0),
                saturation: Some(40.0),
                ..Default::default()
            },
        },
        EffectPreset {
            id: "vintage-faded",
            name: "Faded Memory",
            description: "Washed out and soft",
            category: PresetCategory::Vintage,
            patch: EffectPatch {
                contrast: Some(80.0),
                brightness: Some(110.0),
                saturation: Some(60.0),
                tint: Some("#f5deb3".into()),
                tint_intensity: Some(20.0),
                blur: Some(1.0),
                ..Default::default()
            },
        },
        EffectPreset {
            id: "vintage-70s",
            name: "1970s",
            description: "Warm, retro vibe",
            category: PresetCategory::Vintage,
            patch: EffectPatch {
                tint: Some("#d4af37".into()),
                tint_intensity: Some(25.0),
                saturation: Some(120.0),
                contrast: Some(110.0),
                hue_rotate: Some(-10.0),
                ..Default::default()
            },
        },
        EffectPreset {
            id: "style-cyber",
            name: "Cyberpunk",
            description: "Neon purple aesthetics",
            category: PresetCategory::Stylize,
            patch: EffectPatch {
                tint: Some("#b000ff".into()),
                tint_intensity: Some(40.0),
                contrast: Some(130.0),
                saturation: Some(150.0),
                hue_rotate: Some(15.0),
                ..Default::default()
            },
        },
        EffectPreset {
            id: "style-radioactive",
            name: "Radioactive",
            description: "Toxic green glow",
            category: PresetCategory::Stylize,
            patch: EffectPatch {
                tint: Some("#00ff00".into()),
                tint_intensity: Some(30.0),
                hue_rotate: Some(80.0),
                contrast: Some(150.0),
                invert: Some(10.0),
                ..Default::default()
            },
        },
        EffectPreset {
            id: "style-dream",
            name: "Dreamscape",
            description: "Soft, ethereal glow",
            category: PresetCategory::Stylize,
            patch: EffectPatch {
                blur: Some(5.0),
                brightness: Some(120.0),
                contrast: Some(80.0),
                saturation: Some(130.0),
                tint: Some("#ffc0cb".into()),
                tint_intensity: Some(15.0),
                ..Default::default()
            },
        },
        EffectPreset {
            id: "style-matrix",
            name: "The Matrix",
            description: "Green system code",
            category: PresetCategory::Stylize,
            patch: EffectPatch {
                grayscale: Some(100.0),
                tint: Some("#00ff00".into()),
                tint_intensity: Some(60.0),
                contrast: Some(150.0),
                brightness: Some(80.0),
                ..Default::default()
            },
        },
        EffectPreset {
            id: "util-bw",
            name: "Black & White",
            description: "Standard grayscale",
            category: PresetCategory::Utility,
            patch: EffectPatch {
                grayscale: Some(100.0),
                saturation: Some(0.0),
                ..Default::default()
            },
        },
        EffectPreset {
            id: "util-fix",
            name: "Auto Fix",
            description: "Slight enhancement",
            category: PresetCategory::Utility,
            patch: EffectPatch {
                contrast: Some(110.0),
                saturation: Some(110.0),
                brightness: Some(105.0),
                ..Default::default()
            },
        },
        EffectPreset {
            id: "util-reset",
            name: "Reset All",
            description: "Clear all effects",
            category: PresetCategory::Utility,
            patch: reset_patch(),
        },
    ]
}

/// A patch that sets every parameter back to its neutral default.
fn reset_patch() -> EffectPatch {
    let d = ClipEffects::default();
    EffectPatch {
        opacity: Some(d.opacity),
        blur: Some(d.blur),
        grayscale: Some(d.grayscale),
        sepia: Some(d.sepia),
        invert: Some(d.invert),
        brightness: Some(d.brightness),
        contrast: Some(d.contrast),
        scale: Some(d.scale),
        rotation: Some(d.rotation),
        volume: Some(d.volume),
        saturation: Some(d.saturation),
        hue_rotate: Some(d.hue_rotate),
        blend_mode: Some(d.blend_mode),
        vignette: Some(d.vignette),
        tint: Some(d.tint),
        tint_intensity: Some(d.tint_intensity),
    }
}
