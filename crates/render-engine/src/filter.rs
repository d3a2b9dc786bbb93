//! The per-clip filter chain.
//!
//! Standard image-filter semantics: a gaussian blur (approximated by three
//! box passes) followed by the fixed color chain grayscale → sepia →
//! invert → brightness → contrast → saturate → hue-rotate. Amounts are the
//! model's 0-100 / 0-200 ranges; neutral parameters leave pixels untouched.

use framecut_project_model::ClipEffects;

use crate::frame::{Frame, Rgba};

/// Apply the full filter chain for `fx` to a copy of `src`.
pub fn apply_filters(src: &Frame, fx: &ClipEffects) -> Frame {
    let mut frame = src.clone();

    if fx.blur > 0.0 {
        frame = gaussian_blur(&frame, fx.blur);
    }

    let grayscale = (fx.grayscale / 100.0).clamp(0.0, 1.0);
    let sepia = (fx.sepia / 100.0).clamp(0.0, 1.0);
    let invert = (fx.invert / 100.0).clamp(0.0, 1.0);
    let brightness = (fx.brightness / 100.0).max(0.0);
    let contrast = (fx.contrast / 100.0).max(0.0);
    let saturate = (fx.saturation / 100.0).max(0.0);
    let hue = fx.hue_rotate;

    let color_neutral = grayscale == 0.0
        && sepia == 0.0
        && invert == 0.0
        && brightness == 1.0
        && contrast == 1.0
        && saturate == 1.0
        && hue == 0.0;
    if color_neutral {
        return frame;
    }

    for i in (0..frame.data().len()).step_by(4) {
        let px = frame.data();
        let mut c = [
            px[i] as f64 / 255.0,
            px[i + 1] as f64 / 255.0,
            px[i + 2] as f64 / 255.0,
        ];
        let a = px[i + 3];

        if grayscale > 0.0 {
            c = apply_matrix(c, grayscale_matrix(grayscale));
        }
        if sepia > 0.0 {
            c = apply_matrix(c, sepia_matrix(sepia));
        }
        if invert > 0.0 {
            for v in &mut c {
                *v = *v * (1.0 - invert) + (1.0 - *v) * invert;
            }
        }
        if brightness != 1.0 {
            for v in &mut c {
                *v *= brightness;
            }
        }
        if contrast != 1.0 {
            for v in &mut c {
                *v = (*v - 0.5) * contrast + 0.5;
            }
        }
        if saturate != 1.0 {
            c = apply_matrix(c, saturate_matrix(saturate));
        }
        if hue != 0.0 {
            c = apply_matrix(c, hue_rotate_matrix(hue));
        }

        let x = ((i / 4) % frame.width() as usize) as i64;
        let y = ((i / 4) / frame.width() as usize) as i64;
        frame.set(
            x,
            y,
            Rgba::new(to_u8(c[0]), to_u8(c[1]), to_u8(c[2]), a),
        );
    }

    frame
}

fn to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn apply_matrix(c: [f64; 3], m: [[f64; 3]; 3]) -> [f64; 3] {
    [
        m[0][0] * c[0] + m[0][1] * c[1] + m[0][2] * c[2],
        m[1][0] * c[0] + m[1][1] * c[1] + m[1][2] * c[2],
        m[2][0] * c[0] + m[2][1] * c[1] + m[2][2] * c[2],
    ]
}

/// Linear interpolation between identity and full grayscale (luma weights).
fn grayscale_matrix(g: f64) -> [[f64; 3]; 3] {
    let (lr, lg, lb) = (0.2126, 0.7152, 0.0722);
    [
        [lr + (1.0 - lr) * (1.0 - g), lg * g, lb * g],
        [lr * g, lg + (1.0 - lg) * (1.0 - g), lb * g],
        [lr * g, lg * g, lb + (1.0 - lb) * (1.0 - g)],
    ]
}

fn sepia_matrix(s: f64) -> [[f64; 3]; 3] {
    let t = 1.0 - s;
    [
        [0.393 + 0.607 * t, 0.769 - 0.769 * t, 0.189 - 0.189 * t],
        [0.349 - 0.349 * t, 0.686 + 0.314 * t, 0.168 - 0.168 * t],
        [0.272 - 0.272 * t, 0.534 - 0.534 * t, 0.131 + 0.869 * t],
    ]
}

fn saturate_matrix(s: f64) -> [[f64; 3]; 3] {
    let (lr, lg, lb) = (0.213, 0.715, 0.072);
    [
        [lr + (1.0 - lr) * s, lg * (1.0 - s), lb * (1.0 - s)],
        [lr * (1.0 - s), lg + (1.0 - lg) * s, lb * (1.0 - s)],
        [lr * (1.0 - s), lg * (1.0 - s), lb + (1.0 - lb) * s],
    ]
}

fn hue_rotate_matrix(degrees: f64) -> [[f64; 3]; 3] {
    let rad = degrees.to_radians();
    let (cos, sin) = (rad.cos(), rad.sin());
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

/// Gaussian blur approximated by three successive box blurs.
fn gaussian_blur(src: &Frame, sigma: f64) -> Frame {
    let radii = box_radii(sigma);
    let mut frame = src.clone();
    for r in radii {
        if r > 0 {
            frame = box_blur(&frame, r);
        }
    }
    frame
}

/// Box sizes whose triple application approximates a gaussian of `sigma`.
fn box_radii(sigma: f64) -> [i64; 3] {
    let n = 3.0;
    let w_ideal = (12.0 * sigma * sigma / n + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wu = wl + 2;
    let m_ideal = (12.0 * sigma * sigma - n * (wl * wl) as f64 - 4.0 * n * wl as f64 - 3.0 * n)
        / (-4.0 * wl as f64 - 4.0);
    let m = m_ideal.round() as i64;
    let mut out = [0i64; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let w = if (i as i64) < m { wl } else { wu };
        *slot = (w - 1) / 2;
    }
    out
}

fn box_blur(src: &Frame, radius: i64) -> Frame {
    let horizontal = box_blur_pass(src, radius, true);
    box_blur_pass(&horizontal, radius, false)
}

fn box_blur_pass(src: &Frame, radius: i64, horizontal: bool) -> Frame {
    let mut out = Frame::new(src.width(), src.height());
    let count = (2 * radius + 1) as f64;
    for y in 0..src.height() as i64 {
        for x in 0..src.width() as i64 {
            let mut acc = [0.0f64; 4];
            for d in -radius..=radius {
                let (sx, sy) = if horizontal { (x + d, y) } else { (x, y + d) };
                // Clamp-to-edge sampling keeps borders from darkening.
                let sx = sx.clamp(0, src.width() as i64 - 1);
                let sy = sy.clamp(0, src.height() as i64 - 1);
                let px = src.get(sx, sy);
                acc[0] += px.r as f64;
                acc[1] += px.g as f64;
                acc[2] += px.b as f64;
                acc[3] += px.a as f64;
            }
            out.set(
                x,
                y,
                Rgba::new(
                    (acc[0] / count).round() as u8,
                    (acc[1] / count).round() as u8,
                    (acc[2] / count).round() as u8,
                    (acc[3] / count).round() as u8,
                ),
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(color: Rgba) -> Frame {
        Frame::filled(8, 8, color)
    }

    #[test]
    fn test_neutral_chain_is_identity() {
        let src = solid(Rgba::new(120, 80, 200, 255));
        let out = apply_filters(&src, &ClipEffects::default());
        assert_eq!(out, src);
    }

    #[test]
    fn test_full_grayscale_equalizes_channels() {
        let src = solid(Rgba::new(255, 0, 0, 255));
        let fx = ClipEffects {
            grayscale: 100.0,
            ..Default::default()
        };
        let out = apply_filters(&src, &fx);
        let px = out.get(0, 0);
        assert_eq!(px.r, px.g);
        assert_eq!(px.g, px.b);
    }

    #[test]
    fn test_full_invert_flips_channels() {
        let src = solid(Rgba::new(255, 0, 100, 255));
        let fx = ClipEffects {
            invert: 100.0,
            ..Default::default()
        };
        let out = apply_filters(&src, &fx);
        assert_eq!(out.get(0, 0), Rgba::new(0, 255, 155, 255));
    }

    #[test]
    fn test_brightness_scales_channels() {
        let src = solid(Rgba::new(100, 100, 100, 255));
        let fx = ClipEffects {
            brightness: 50.0,
            ..Default::default()
        };
        let out = apply_filters(&src, &fx);
        assert_eq!(out.get(0, 0).r, 50);
    }

    #[test]
    fn test_zero_contrast_collapses_to_mid_gray() {
        let src = solid(Rgba::new(30, 200, 90, 255));
        let fx = ClipEffects {
            contrast: 0.0,
            ..Default::default()
        };
        let out = apply_filters(&src, &fx);
        assert_eq!(out.get(0, 0), Rgba::new(128, 128, 128, 255));
    }

    #[test]
    fn test_blur_preserves_solid_color() {
        let src = solid(Rgba::new(10, 200, 30, 255));
        let fx = ClipEffects {
            blur: 2.0,
            ..Default::default()
        };
        let out = apply_filters(&src, &fx);
        assert_eq!(out.get(4, 4), Rgba::new(10, 200, 30, 255));
    }

    #[test]
    fn test_blur_spreads_edges() {
        let mut src = Frame::filled(9, 9, Rgba::BLACK);
        src.set(4, 4, Rgba::WHITE);
        let fx = ClipEffects {
            blur: 1.0,
            ..Default::default()
        };
        let out = apply_filters(&src, &fx);
        assert!(out.get(4, 4).r < 255);
        assert!(out.get(3, 4).r > 0);
    }

    #[test]
    fn test_hue_rotate_360_is_near_identity() {
        let src = solid(Rgba::new(200, 50, 120, 255));
        let fx = ClipEffects {
            hue_rotate: 360.0,
            ..Default::default()
        };
        let out = apply_filters(&src, &fx);
        let px = out.get(0, 0);
        assert!((px.r as i32 - 200).abs() <= 1);
        assert!((px.g as i32 - 50).abs() <= 1);
        assert!((px.b as i32 - 120).abs() <= 1);
    }
}
