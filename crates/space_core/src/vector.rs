//! World-space vector helpers.
//!
//! World coordinates are kilometres stored in a [`DVec2`]. Angles follow the
//! navigation convention used by the simulation: heading 0 points along +Y
//! and headings grow clockwise.

use glam::DVec2;

/// 2D world coordinate in kilometres.
pub type Vector = DVec2;

/// Tolerance for float comparisons on angles and vector lengths.
pub const EPSILON: f64 = 1e-9;

/// True when `a` and `b` differ by no more than [`EPSILON`], scaled up for large magnitudes.
pub fn nearly_equal(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= EPSILON * scale
}

/// Heading-aware operations on world vectors.
pub trait VectorExt: Sized {
    /// Unit vector pointing along `heading`.
    fn direction(heading: f64) -> Self;

    /// Rotate clockwise by `angle` radians.
    fn rotated(self, angle: f64) -> Self;

    /// Heading of this vector (inverse of [`VectorExt::direction`]).
    fn argument(self) -> f64;

    /// Same direction, new length. Zero vectors stay zero.
    fn with_length(self, length: f64) -> Self;
}

impl VectorExt for DVec2 {
    fn direction(heading: f64) -> Self {
        let (sin, cos) = heading.sin_cos();
        DVec2::new(sin, cos)
    }

    fn rotated(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        DVec2::new(
            self.x * cos + self.y * sin,
            -self.x * sin + self.y * cos,
        )
    }

    fn argument(self) -> f64 {
        self.x.atan2(self.y)
    }

    fn with_length(self, length: f64) -> Self {
        let current = self.length();
        if current <= EPSILON {
            return self;
        }
        self * (length / current)
    }
}
