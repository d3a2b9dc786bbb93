//! Compositing blend operators.
//!
//! Implements the full separable and non-separable operator table from the
//! CSS/W3C compositing model, working in normalized `[0, 1]` channel space.

use framecut_project_model::BlendMode;

use crate::frame::Rgba;

/// Blend source color `src` into backdrop `dst` with `mode`, then
/// source-over composite at `src_alpha` (already folded with the source
/// pixel's own alpha by the caller or here via `src.a`).
pub fn composite(dst: Rgba, src: Rgba, src_alpha: f64, mode: BlendMode) -> Rgba {
    let cb = [norm(dst.r), norm(dst.g), norm(dst.b)];
    let cs = [norm(src.r), norm(src.g), norm(src.b)];
    let ab = norm(dst.a);
    let a_s = (norm(src.a) * src_alpha).clamp(0.0, 1.0);

    let blended = blend_rgb(cb, cs, mode);

    // Backdrop participation: where the backdrop is transparent the raw
    // source color is used, scaling into the blended color with ab.
    let mixed = [
        (1.0 - ab) * cs[0] + ab * blended[0],
        (1.0 - ab) * cs[1] + ab * blended[1],
        (1.0 - ab) * cs[2] + ab * blended[2],
    ];

    let ao = a_s + ab * (1.0 - a_s);
    if ao <= 0.0 {
        return Rgba::TRANSPARENT;
    }
    let co = |i: usize| (a_s * mixed[i] + ab * (1.0 - a_s) * cb[i]) / ao;

    Rgba::new(denorm(co(0)), denorm(co(1)), denorm(co(2)), denorm(ao))
}

fn blend_rgb(cb: [f64; 3], cs: [f64; 3], mode: BlendMode) -> [f64; 3] {
    use BlendMode::*;
    match mode {
        Normal => cs,
        Multiply => per_channel(cb, cs, |b, s| b * s),
        Screen => per_channel(cb, cs, screen),
        Overlay => per_channel(cb, cs, |b, s| hard_light(s, b)),
        Darken => per_channel(cb, cs, f64::min),
        Lighten => per_channel(cb, cs, f64::max),
        ColorDodge => per_channel(cb, cs, color_dodge),
        ColorBurn => per_channel(cb, cs, color_burn),
        HardLight => per_channel(cb, cs, hard_light),
        SoftLight => per_channel(cb, cs, soft_light),
        Difference => per_channel(cb, cs, |b, s| (b - s).abs()),
        Exclusion => per_channel(cb, cs, |b, s| b + s - 2.0 * b * s),
        Hue => set_lum(set_sat(cs, sat(cb)), lum(cb)),
        Saturation => set_lum(set_sat(cb, sat(cs)), lum(cb)),
        Color => set_lum(cs, lum(cb)),
        Luminosity => set_lum(cb, lum(cs)),
    }
}

fn per_channel(cb: [f64; 3], cs: [f64; 3], f: impl Fn(f64, f64) -> f64) -> [f64; 3] {
    [f(cb[0], cs[0]), f(cb[1], cs[1]), f(cb[2], cs[2])]
}

fn screen(b: f64, s: f64) -> f64 {
    b + s - b * s
}

fn color_dodge(b: f64, s: f64) -> f64 {
    if b == 0.0 {
        0.0
    } else if s >= 1.0 {
        1.0
    } else {
        (b / (1.0 - s)).min(1.0)
    }
}

fn color_burn(b: f64, s: f64) -> f64 {
    if b >= 1.0 {
        1.0
    } else if s == 0.0 {
        0.0
    } else {
        1.0 - ((1.0 - b) / s).min(1.0)
    }
}

fn hard_light(b: f64, s: f64) -> f64 {
    if s <= 0.5 {
        b * 2.0 * s
    } else {
        screen(b, 2.0 * s - 1.0)
    }
}

fn soft_light(b: f64, s: f64) -> f64 {
    if s <= 0.5 {
        b - (1.0 - 2.0 * s) * b * (1.0 - b)
    } else {
        let d = if b <= 0.25 {
            ((16.0 * b - 12.0) * b + 4.0) * b
        } else {
            b.sqrt()
        };
        b + (2.0 * s - 1.0) * (d - b)
    }
}

// Non-separable helpers (W3C lum/sat transfer).

fn lum(c: [f64; 3]) -> f64 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn clip_color(c: [f64; 3]) -> [f64; 3] {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 {
        for v in &mut out {
            *v = l + (*v - l) * l / (l - n);
        }
    }
    if x > 1.0 {
        for v in &mut out {
            *v = l + (*v - l) * (1.0 - l) / (x - l);
        }
    }
    out
}

fn set_lum(c: [f64; 3], l: f64) -> [f64; 3] {
    let d = l - lum(c);
    clip_color([c[0] + d, c[1] + d, c[2] + d])
}

fn sat(c: [f64; 3]) -> f64 {
    c[0].max(c[1]).max(c[2]) - c[0].min(c[1]).min(c[2])
}

fn set_sat(c: [f64; 3], s: f64) -> [f64; 3] {
    let mut idx = [0usize, 1, 2];
    idx.sort_by(|&a, &b| c[a].total_cmp(&c[b]));
    let (min_i, mid_i, max_i) = (idx[0], idx[1], idx[2]);

    let mut out = [0.0; 3];
    if c[max_i] > c[min_i] {
        out[mid_i] = (c[mid_i] - c[min_i]) * s / (c[max_i] - c[min_i]);
        out[max_i] = s;
    }
    out
}

fn norm(v: u8) -> f64 {
    v as f64 / 255.0
}

fn denorm(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
