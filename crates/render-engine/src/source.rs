//! Decode surfaces feeding the compositor.

use std::collections::HashMap;

use framecut_project_model::MediaKind;

use crate::frame::{Frame, Rgba};

/// A decodable media surface keyed to an asset.
///
/// The compositor only samples `current_image`; `seek`, `set_playing`, and
/// `set_volume` exist for the playback synchronizer and the export driver
/// to steer decoding. A source that has no frame ready returns `None` and
/// its layer is skipped for that frame.
pub trait FrameSource: Send {
    fn kind(&self) -> MediaKind;

    /// The decoded image for the current position, if ready.
    fn current_image(&self) -> Option<&Frame>;

    /// Position the source at `secs` into its own media.
    fn seek(&mut self, secs: f64);

    /// Current decode position in seconds.
    fn position_secs(&self) -> f64;

    fn set_playing(&mut self, playing: bool);

    fn set_volume(&mut self, volume: f64);
}

/// Asset-id → source registry handed to the compositor and export driver.
#[derive(Default)]
pub struct SourceBank {
    sources: HashMap<String, Box<dyn FrameSource>>,
}

impl SourceBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset_id: impl Into<String>, source: Box<dyn FrameSource>) {
        self.sources.insert(asset_id.into(), source);
    }

    pub fn get(&self, asset_id: &str) -> Option<&dyn FrameSource> {
        self.sources.get(asset_id).map(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, asset_id: &str) -> Option<&mut Box<dyn FrameSource>> {
        self.sources.get_mut(asset_id)
    }

    pub fn remove(&mut self, asset_id: &str) -> Option<Box<dyn FrameSource>> {
        self.sources.remove(asset_id)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Box<dyn FrameSource>)> {
        self.sources.iter_mut()
    }
}

/// A static image surface (photos, logos). Seeking is a no-op.
pub struct StillImageSource {
    image: Frame,
}

impl StillImageSource {
    pub fn new(image: Frame) -> Self {
        Self { image }
    }
}

impl FrameSource for StillImageSource {
    fn kind(&self) -> MediaKind {
        MediaKind::Image
    }

    fn current_image(&self) -> Option<&Frame> {
        Some(&self.image)
    }

    fn seek(&mut self, _secs: f64) {}

    fn position_secs(&self) -> f64 {
        0.0
    }

    fn set_playing(&mut self, _playing: bool) {}
    fn set_volume(&mut self, _volume: f64) {}
}

/// A solid-color "video" surface for demos and tests.
pub struct SolidColorSource {
    frame: Frame,
    position: f64,
    playing: bool,
    volume: f64,
}

impl SolidColorSource {
    pub fn new(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            frame: Frame::filled(width, height, color),
            position: 0.0,
            playing: false,
            volume: 100.0,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }
}

impl FrameSource for SolidColorSource {
    fn kind(&self) -> MediaKind {
        MediaKind::Video
    }

    fn current_image(&self) -> Option<&Frame> {
        Some(&self.frame)
    }

    fn seek(&mut self, secs: f64) {
        self.position = secs;
    }

    fn position_secs(&self) -> f64 {
        self.position
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }
}

/// A deterministic time-varying pattern: the frame content is a pure
/// function of the seek position, which makes compositor and export output
/// reproducible in tests.
pub struct TestPatternSource {
    width: u32,
    height: u32,
    frame: Frame,
    position: f64,
}

impl TestPatternSource {
    pub fn new(width: u32, height: u32) -> Self {
        let mut src = Self {
            width,
            height,
            frame: Frame::new(width, height),
            position: 0.0,
        };
        src.regenerate();
        src
    }

    fn regenerate(&mut self) {
        let t = (self.position * 10.0) as i64;
        for y in 0..self.height as i64 {
            for x in 0..self.width as i64 {
                let v = (((x + y + t) % 16) * 16) as u8;
                self.frame.set(x, y, Rgba::new(v, v.wrapping_add(64), 255 - v, 255));
            }
        }
    }
}

impl FrameSource for TestPatternSource {
    fn kind(&self) -> MediaKind {
        MediaKind::Video
    }

    fn current_image(&self) -> Option<&Frame> {
        Some(&self.frame)
    }

    fn seek(&mut self, secs: f64) {
        self.position = secs;
        self.regenerate();
    }

    fn position_secs(&self) -> f64 {
        self.position
    }

    fn set_playing(&mut self, _playing: bool) {}
    fn set_volume(&mut self, _volume: f64) {}
}
