//! List the built-in effect presets.

use framecut_project_model::{builtin_presets, PresetCategory};

pub fn run() -> anyhow::Result<()> {
    let presets = builtin_presets();

    for category in [
        PresetCategory::Cinematic,
        PresetCategory::Vintage,
        PresetCategory::Stylize,
        PresetCategory::Utility,
    ] {
        println!("{category:?}");
        for preset in presets.iter().filter(|p| p.category == category) {
            println!("  {:<16} {:<20} {}", preset.id, preset.name, preset.description);
        }
        println!();
    }

    println!("{} presets total", presets.len());
    Ok(())
}
