//! Owned RGBA8 pixel surfaces.

use framecut_common::{FramecutError, FramecutResult};

/// A non-premultiplied RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#rrggbb` hex color (opaque).
    pub fn from_hex(hex: &str) -> FramecutResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(FramecutError::render(format!("invalid hex color: {hex}")));
        }
        let parse = |s: &str| {
            u8::from_str_radix(s, 16)
                .map_err(|_| FramecutError::render(format!("invalid hex color: {hex}")))
        };
        Ok(Self {
            r: parse(&digits[0..2])?,
            g: parse(&digits[2..4])?,
            b: parse(&digits[4..6])?,
            a: 255,
        })
    }
}

/// An owned RGBA8 image.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// A fully transparent frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// A frame filled with one color.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for _ in 0..(width as u64) * (height as u64) {
            data.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`; out-of-bounds reads are transparent.
    pub fn get(&self, x: i64, y: i64) -> Rgba {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return Rgba::TRANSPARENT;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Rgba::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    /// Write pixel at `(x, y)`; out-of-bounds writes are dropped.
    pub fn set(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data[i] = color.r;
        self.data[i + 1] = color.g;
        self.data[i + 2] = color.b;
        self.data[i + 3] = color.a;
    }

    /// Fill the whole frame with one color.
    pub fn fill(&mut self, color: Rgba) {
        for px in self.data.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = color.a;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgba::from_hex("#6366f1").unwrap(), Rgba::new(0x63, 0x66, 0xf1, 255));
        assert_eq!(Rgba::from_hex("00ff00").unwrap(), Rgba::new(0, 255, 0, 255));
        assert!(Rgba::from_hex("#abc").is_err());
        assert!(Rgba::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_out_of_bounds_access_is_safe() {
        let mut frame = Frame::new(4, 4);
        assert_eq!(frame.get(-1, 0), Rgba::TRANSPARENT);
        assert_eq!(frame.get(0, 99), Rgba::TRANSPARENT);
        frame.set(99, 99, Rgba::WHITE); // dropped
        frame.set(1, 1, Rgba::WHITE);
        assert_eq!(frame.get(1, 1), Rgba::WHITE);
    }

    #[test]
    fn test_filled_frame() {
        let frame = Frame::filled(2, 2, Rgba::new(10, 20, 30, 40));
        assert_eq!(frame.get(0, 0), Rgba::new(10, 20, 30, 40));
        assert_eq!(frame.get(1, 1), Rgba::new(10, 20, 30, 40));
        assert_eq!(frame.data().len(), 16);
    }
}
