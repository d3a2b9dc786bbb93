//! Timeline surface geometry.

use serde::{Deserialize, Serialize};

/// The mapping between the timeline's pixel surface and project time.
///
/// `zoom` is pixels per second, so horizontal conversion is a plain
/// multiply/divide. Vertically, tracks are fixed-height rows stacked from
/// the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineGeometry {
    /// Pixels per second.
    pub zoom: f64,
    /// Height of one track row in pixels.
    pub track_row_height: f64,
    /// Magnetic snap radius in pixels.
    pub snap_threshold_px: f64,
}

impl TimelineGeometry {
    /// Convert a horizontal pixel position to seconds.
    pub fn px_to_secs(&self, px: f64) -> f64 {
        px / self.zoom
    }

    /// Convert seconds to a horizontal pixel position.
    pub fn secs_to_px(&self, secs: f64) -> f64 {
        secs * self.zoom
    }

    /// Snap radius expressed in seconds at the current zoom.
    pub fn snap_threshold_secs(&self) -> f64 {
        self.snap_threshold_px / self.zoom
    }

    /// Resolve a vertical pixel position to a track row index, clamped to
    /// `[0, track_count)`. `None` when there are no tracks.
    pub fn row_at(&self, py: f64, track_count: usize) -> Option<usize> {
        if track_count == 0 {
            return None;
        }
        let row = (py / self.track_row_height).floor();
        let clamped = row.max(0.0).min((track_count - 1) as f64);
        Some(clamped as usize)
    }
}
