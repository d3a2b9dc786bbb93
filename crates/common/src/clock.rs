//! Clock utilities for playback and export.
//!
//! The editor runs two independent clocks that never pace each other:
//! - [`PlaybackTicker`] integrates real elapsed wall time into playhead
//!   advancement for the live preview loop.
//! - [`VirtualClock`] steps by exactly `1/fps` per frame during export so
//!   output timing is exact regardless of rendering speed.

use std::time::Instant;

/// Largest delta a single playback tick may report, in seconds.
///
/// Absorbs frame-drop spikes so a stalled scheduler cannot teleport the
/// playhead.
pub const MAX_TICK_SECS: f64 = 0.1;

/// Wall-clock integrator for the live playback loop.
///
/// Call [`PlaybackTicker::tick`] once per animation frame; it returns the
/// elapsed seconds since the previous tick, clamped to [`MAX_TICK_SECS`].
#[derive(Debug)]
pub struct PlaybackTicker {
    last: Instant,
}

impl PlaybackTicker {
    /// Start a ticker anchored to now.
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Elapsed seconds since the previous tick, clamped to `MAX_TICK_SECS`.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        delta.min(MAX_TICK_SECS)
    }

    /// Clamp an externally measured delta the same way `tick` would.
    pub fn clamp_delta(delta_secs: f64) -> f64 {
        delta_secs.max(0.0).min(MAX_TICK_SECS)
    }
}

/// Fixed-step frame clock for export rendering.
///
/// Advances by exactly `1/fps` seconds per call, independent of wall time.
#[derive(Debug, Clone)]
pub struct VirtualClock {
    fps: u32,
    frame_index: u64,
}

impl VirtualClock {
    /// Create a clock at frame zero. `fps` is clamped to at least 1.
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1),
            frame_index: 0,
        }
    }

    /// Current virtual time in seconds.
    pub fn time_secs(&self) -> f64 {
        self.frame_index as f64 / self.fps as f64
    }

    /// Current frame index.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Seconds covered by one frame.
    pub fn frame_step_secs(&self) -> f64 {
        1.0 / self.fps as f64
    }

    /// Advance to the next frame and return the new virtual time.
    pub fn advance(&mut self) -> f64 {
        self.frame_index += 1;
        self.time_secs()
    }

    /// Reset to frame zero.
    pub fn reset(&mut self) {
        self.frame_index = 0;
    }

    /// Total frames needed to cover `duration_secs`.
    pub fn total_frames(&self, duration_secs: f64) -> u64 {
        (duration_secs * self.fps as f64).ceil() as u64
    }
}
