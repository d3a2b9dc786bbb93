//! The export driver.
//!
//! Renders the project frame by frame on a fixed virtual clock and hands
//! each frame to an [`Encoder`]. Rendering reuses [`crate::render_frame`],
//! so exported pixels match the preview exactly; only the clock differs
//! (virtual steps of `1/fps` instead of wall time).

use std::fs;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use framecut_common::{FramecutError, FramecutResult, VirtualClock};
use framecut_project_model::{MediaKind, ProjectState};
use serde::{Deserialize, Serialize};

use crate::compositor::render_frame;
use crate::frame::Frame;
use crate::source::SourceBank;

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Mp4,
    Webm,
}

/// Everything the encoder and driver need to produce an output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Video bitrate in bits per second.
    pub video_bitrate: u64,
    /// Audio bitrate in bits per second.
    pub audio_bitrate: u64,
    pub format: ExportFormat,
    /// Output name without extension.
    pub file_stem: String,
}

impl ExportSettings {
    /// Settings matching the project canvas at the given frame rate.
    pub fn for_project(state: &ProjectState, fps: u32) -> Self {
        Self {
            width: state.width,
            height: state.height,
            fps,
            video_bitrate: 8_000_000,
            audio_bitrate: 128_000,
            format: ExportFormat::Mp4,
            file_stem: "export".to_string(),
        }
    }
}

/// Sink for rendered frames.
///
/// `begin` is called once before the first frame, `finish` after the last.
/// `abort` tears down without finalizing; a cancelled export never produces
/// a playable artifact.
pub trait Encoder: Send {
    fn begin(&mut self, settings: &ExportSettings) -> FramecutResult<()>;

    fn write_frame(&mut self, frame: &Frame, pts_secs: f64) -> FramecutResult<()>;

    fn finish(&mut self) -> FramecutResult<()>;

    fn abort(&mut self);
}

/// Terminal and in-flight states of an export job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Idle,
    Rendering,
    Completed,
    Cancelled,
    Error(String),
}

/// Progress report delivered after every encoded frame.
#[derive(Debug, Clone)]
pub struct ExportProgress {
    /// Fraction complete in `[0, 1]` (emitted / total frames).
    pub progress: f64,

    /// Frames handed to the encoder so far.
    pub frames_rendered: u64,

    /// Total frames this export will produce.
    pub total_frames: u64,

    /// Observed rendering throughput in frames per second.
    pub fps: f64,

    /// Wall-clock seconds since the export started.
    pub elapsed_secs: f64,

    /// Estimated wall-clock seconds remaining.
    pub eta_secs: f64,
}

/// Progress callback for export rendering.
pub type ProgressCallback = Box<dyn Fn(ExportProgress) + Send>;

/// Cooperative cancellation handle; clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Render and encode the whole project.
///
/// The driver resets the virtual clock to zero, steps exactly `1/fps` per
/// frame, and finishes once virtual time covers the project duration
/// (`ceil(duration × fps)` frames). Before each frame, active video sources
/// are sought to their clip-relative time so decode position follows the
/// virtual clock rather than wall time.
///
/// Pausing live playback before calling this is the caller's job.
pub async fn run_export(
    state: &ProjectState,
    sources: &mut SourceBank,
    settings: &ExportSettings,
    encoder: &mut dyn Encoder,
    cancel: &CancelToken,
    progress: Option<ProgressCallback>,
) -> ExportStatus {
    let mut clock = VirtualClock::new(settings.fps);
    clock.reset();
    let total_frames = clock.total_frames(state.duration);

    tracing::info!(
        width = settings.width,
        height = settings.height,
        fps = settings.fps,
        total_frames,
        format = ?settings.format,
        "Starting export"
    );

    if let Err(e) = encoder.begin(settings) {
        tracing::error!(error = %e, "Encoder failed to start");
        return ExportStatus::Error(e.to_string());
    }

    let started = Instant::now();
    let mut frames_rendered: u64 = 0;

    while clock.frame_index() < total_frames {
        if cancel.is_cancelled() {
            tracing::info!(frames_rendered, "Export cancelled");
            encoder.abort();
            return ExportStatus::Cancelled;
        }

        let timestamp = clock.time_secs();
        seek_active_sources(state, sources, timestamp);

        let frame = render_frame(state, sources, timestamp, settings.width, settings.height);
        if let Err(e) = encoder.write_frame(&frame, timestamp) {
            tracing::error!(error = %e, frame = clock.frame_index(), "Encoder write failed");
            encoder.abort();
            return ExportStatus::Error(e.to_string());
        }

        frames_rendered += 1;
        clock.advance();

        if let Some(cb) = &progress {
            let elapsed = started.elapsed().as_secs_f64();
            let throughput = if elapsed > 0.0 {
                frames_rendered as f64 / elapsed
            } else {
                0.0
            };
            let remaining = total_frames - frames_rendered;
            cb(ExportProgress {
                progress: frames_rendered as f64 / total_frames.max(1) as f64,
                frames_rendered,
                total_frames,
                fps: throughput,
                elapsed_secs: elapsed,
                eta_secs: if throughput > 0.0 {
                    remaining as f64 / throughput
                } else {
                    0.0
                },
            });
        }

        // Keep the runtime responsive during long renders.
        tokio::task::yield_now().await;
    }

    if let Err(e) = encoder.finish() {
        tracing::error!(error = %e, "Encoder failed to finalize");
        return ExportStatus::Error(e.to_string());
    }

    tracing::info!(
        frames_rendered,
        elapsed_secs = started.elapsed().as_secs_f64(),
        "Export complete"
    );
    ExportStatus::Completed
}

/// Seek every active video source to its clip-relative time.
fn seek_active_sources(state: &ProjectState, sources: &mut SourceBank, timestamp: f64) {
    for (asset_id, source) in sources.iter_mut() {
        if source.kind() == MediaKind::Image {
            continue;
        }
        if let Some(clip) = state
            .active_clips(timestamp)
            .find(|c| &c.asset_id == asset_id)
        {
            source.seek(clip.source_time(timestamp));
        }
    }
}

/// Writes each frame as a binary PPM file (`{stem}-{index:06}.ppm`).
///
/// A demo/test sink: it exercises the full driver contract without any
/// codec. Aborting removes everything written so far.
pub struct PpmSequenceEncoder {
    dir: PathBuf,
    file_stem: String,
    written: Vec<PathBuf>,
    frame_index: u64,
}

impl PpmSequenceEncoder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            file_stem: "frame".to_string(),
            written: Vec::new(),
            frame_index: 0,
        }
    }

    /// Paths written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Encoder for PpmSequenceEncoder {
    fn begin(&mut self, settings: &ExportSettings) -> FramecutResult<()> {
        self.file_stem = settings.file_stem.clone();
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    fn write_frame(&mut self, frame: &Frame, _pts_secs: f64) -> FramecutResult<()> {
        let path = self
            .dir
            .join(format!("{}-{:06}.ppm", self.file_stem, self.frame_index));
        let mut file = fs::File::create(&path)?;
        write!(file, "P6\n{} {}\n255\n", frame.width(), frame.height())?;
        let mut rgb = Vec::with_capacity(frame.data().len() / 4 * 3);
        for px in frame.data().chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
        }
        file.write_all(&rgb)?;
        self.written.push(path);
        self.frame_index += 1;
        Ok(())
    }

    fn finish(&mut self) -> FramecutResult<()> {
        if self.written.is_empty() {
            return Err(FramecutError::encoder("no frames were written"));
        }
        Ok(())
    }

    fn abort(&mut self) {
        for path in self.written.drain(..) {
            let _ = fs::remove_file(path);
        }
    }
}
