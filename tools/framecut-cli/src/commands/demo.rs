//! Render a demo project to a PPM frame sequence.

use std::path::PathBuf;

use framecut_project_model::{
    builtin_presets, Action, Asset, ClipTransitions, MediaKind, ProjectPatch, ProjectStore,
    TransitionKind, TransitionSpec,
};
use framecut_render_engine::source::TestPatternSource;
use framecut_render_engine::{
    run_export, CancelToken, ExportFormat, ExportProgress, ExportSettings, ExportStatus,
    PpmSequenceEncoder, SourceBank,
};
use framecut_timeline_engine::{drop_asset, drop_preset, TimelineGeometry};

pub async fn run(
    output: PathBuf,
    width: u32,
    height: u32,
    fps: u32,
    duration: f64,
) -> anyhow::Result<()> {
    println!("Rendering demo project to: {}", output.display());

    let mut store = ProjectStore::new();
    store.dispatch(&Action::SetProject(ProjectPatch {
        duration: Some(duration),
        ..Default::default()
    }));

    // Two test-pattern layers, the front one with a fade-in and a preset.
    let geometry = TimelineGeometry {
        zoom: 50.0,
        track_row_height: 112.0,
        snap_threshold_px: 20.0,
    };
    let mut sources = SourceBank::new();
    let mut front_clip_id = None;
    for (track_id, offset_px) in [("track-v1", 0.0), ("track-v2", 0.0)] {
        let asset_id = store.alloc_asset_id();
        store.dispatch(&Action::AddAsset(Asset {
            id: asset_id.clone(),
            name: format!("pattern-{track_id}"),
            kind: MediaKind::Video,
            source: format!("test:{asset_id}"),
            duration_secs: duration,
        }));
        sources.insert(&asset_id, Box::new(TestPatternSource::new(width, height)));

        let clip_id = store.alloc_clip_id();
        let state = store.snapshot();
        if let Some(action) =
            drop_asset(&state, &asset_id, track_id, offset_px, &clip_id, &geometry)
        {
            store.dispatch(&action);
        }
        if track_id == "track-v1" {
            front_clip_id = Some(clip_id);
        }
    }

    if let Some(clip_id) = front_clip_id {
        let presets = builtin_presets();
        if let Some(preset) = presets.iter().find(|p| p.id == "cine-teal-orange") {
            let state = store.snapshot();
            if let Some(action) = drop_preset(&state, preset, &clip_id) {
                store.dispatch(&action);
            }
        }
        store.dispatch(&Action::UpdateClip {
            clip_id,
            patch: framecut_project_model::ClipPatch {
                transition: Some(Some(ClipTransitions {
                    transition_in: TransitionSpec {
                        kind: TransitionKind::Fade,
                        duration: 1.0,
                    },
                    transition_out: TransitionSpec {
                        kind: TransitionKind::WipeLeft,
                        duration: 1.0,
                    },
                })),
                ..Default::default()
            },
        });
    }

    let state = store.snapshot();
    let settings = ExportSettings {
        width,
        height,
        fps,
        video_bitrate: 8_000_000,
        audio_bitrate: 128_000,
        format: ExportFormat::Mp4,
        file_stem: "demo".to_string(),
    };
    let mut encoder = PpmSequenceEncoder::new(&output);

    let progress: Box<dyn Fn(ExportProgress) + Send> = Box::new(|p| {
        print!(
            "\r  {:5.1}%  {}/{} frames  {:.1} fps  ETA {:.0}s   ",
            p.progress * 100.0,
            p.frames_rendered,
            p.total_frames,
            p.fps,
            p.eta_secs
        );
    });

    let status = run_export(
        &state,
        &mut sources,
        &settings,
        &mut encoder,
        &CancelToken::new(),
        Some(progress),
    )
    .await;
    println!();

    match status {
        ExportStatus::Completed => {
            println!("Done: {} frames in {}", encoder.written().len(), output.display());
            Ok(())
        }
        ExportStatus::Cancelled => Err(anyhow::anyhow!("export was cancelled")),
        ExportStatus::Error(msg) => Err(anyhow::anyhow!("export failed: {msg}")),
        other => Err(anyhow::anyhow!("unexpected export status: {other:?}")),
    }
}
