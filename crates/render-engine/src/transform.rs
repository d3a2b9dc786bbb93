//! 2D affine transforms.

/// Row-major 2×3 affine matrix mapping `(x, y)` to
/// `(a·x + c·y + e, b·x + d·y + f)` (the canvas transform convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(tx: f64, ty: f64) -> Self {
        Affine {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    pub fn rotate_degrees(degrees: f64) -> Self {
        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        Affine {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn scale(s: f64) -> Self {
        Affine {
            a: s,
            d: s,
            ..Self::IDENTITY
        }
    }

    /// `self ∘ other`: apply `other` first, then `self`.
    pub fn then(&self, other: &Affine) -> Affine {
        Affine {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Map a point through the transform.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Inverse transform; `None` when degenerate (zero determinant).
    pub fn inverse(&self) -> Option<Affine> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < 1e-12 {
            return None;
        }
        let inv_det = 1.0 / det;
        Some(Affine {
            a: self.d * inv_det,
            b: -self.b * inv_det,
            c: -self.c * inv_det,
            d: self.a * inv_det,
            e: (self.c * self.f - self.d * self.e) * inv_det,
            f: (self.b * self.e - self.a * self.f) * inv_det,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_identity_maps_points_unchanged() {
        assert!(close(Affine::IDENTITY.apply(3.0, -4.5), (3.0, -4.5)));
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let r = Affine::rotate_degrees(90.0);
        assert!(close(r.apply(1.0, 0.0), (0.0, 1.0)));
    }

    #[test]
    fn test_composition_order() {
        // Translate then scale vs scale then translate differ.
        let t = Affine::translate(10.0, 0.0);
        let s = Affine::scale(2.0);
        assert!(close(s.then(&t).apply(1.0, 0.0), (22.0, 0.0)));
        assert!(close(t.then(&s).apply(1.0, 0.0), (12.0, 0.0)));
    }

    #[test]
    fn test_inverse_round_trips() {
        let m = Affine::translate(5.0, -3.0)
            .then(&Affine::rotate_degrees(30.0))
            .then(&Affine::scale(1.5));
        let inv = m.inverse().unwrap();
        let (x, y) = m.apply(2.0, 7.0);
        assert!(close(inv.apply(x, y), (2.0, 7.0)));
    }

    #[test]
    fn test_degenerate_has_no_inverse() {
        assert!(Affine::scale(0.0).inverse().is_none());
    }
}
