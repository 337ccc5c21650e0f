//! World ↔ device projection.
//!
//! World space is kilometres with +Y up; device space is pixels with +Y down.
//! Device coordinates are saturated to [`SAFE_INT_MAX`] so drawing backends
//! that convert to 32-bit integers never wrap.

use glam::{DVec2, Vec2};

use crate::vector::{Vector, VectorExt};

/// Largest device coordinate handed to a drawing backend (7/8 of `i32::MAX`).
pub const SAFE_INT_MAX: i32 = (i32::MAX / 8) * 7;
/// Smallest device coordinate handed to a drawing backend (7/8 of `i32::MIN`).
pub const SAFE_INT_MIN: i32 = (i32::MIN / 8) * 7;

/// One frame's world → device mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// World point shown at the viewport centre.
    pub origin: Vector,
    /// View rotation in radians; world heading `rotation` points up on screen.
    pub rotation: f64,
    /// Kilometres per device inch.
    pub world_scale: f64,
    /// Device pixels per inch, per axis.
    pub dpi: DVec2,
    /// Viewport centre in device pixels.
    pub center: DVec2,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            origin: Vector::ZERO,
            rotation: 0.0,
            world_scale: 1.0e6,
            dpi: DVec2::splat(96.0),
            center: DVec2::ZERO,
        }
    }
}

impl Projection {
    pub fn new(origin: Vector, rotation: f64, world_scale: f64, dpi: Vec2, center: Vec2) -> Self {
        Self {
            origin,
            rotation,
            world_scale,
            dpi: dpi.as_dvec2(),
            center: center.as_dvec2(),
        }
    }

    /// Project a world point onto the device surface.
    ///
    /// Points whose device radius reaches [`SAFE_INT_MAX`] are pulled back
    /// along the same direction so the radius equals the bound exactly.
    pub fn world_to_device(&self, world: Vector) -> Vec2 {
        let p = ((world - self.origin) / self.world_scale).rotated(-self.rotation);
        let mut device = DVec2::new(
            p.x * self.dpi.x + self.center.x,
            -p.y * self.dpi.y + self.center.y,
        );
        let radius = device.x.abs().max(device.y.abs());
        let bound = SAFE_INT_MAX as f64;
        if radius >= bound {
            device = device * bound / radius;
        }
        device.as_vec2()
    }

    /// Map a device point back into world space. Inverse of [`Self::world_to_device`]
    /// for points that were not clamped.
    pub fn device_to_world(&self, device: Vec2) -> Vector {
        let d = device.as_dvec2();
        let p = DVec2::new(
            (d.x - self.center.x) / self.dpi.x,
            -(d.y - self.center.y) / self.dpi.y,
        );
        p.rotated(self.rotation) * self.world_scale + self.origin
    }

    /// Project a world length (a radius, say) along one axis. Saturates at both ends.
    pub fn world_to_device_scalar(&self, dpi: f64, length: f64) -> f32 {
        let result = length * dpi / self.world_scale;
        if result <= SAFE_INT_MIN as f64 {
            return SAFE_INT_MIN as f32;
        }
        if result >= SAFE_INT_MAX as f64 {
            return SAFE_INT_MAX as f32;
        }
        result as f32
    }

    /// [`Self::world_to_device_scalar`] for both axes.
    pub fn world_to_device_scalars(&self, length: f64) -> Vec2 {
        Vec2::new(
            self.world_to_device_scalar(self.dpi.x, length),
            self.world_to_device_scalar(self.dpi.y, length),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn projection(rotation: f64, scale: f64) -> Projection {
        Projection::new(
            Vector::new(1.5e6, -2.0e6),
            rotation,
            scale,
            Vec2::new(96.0, 120.0),
            Vec2::new(400.0, 300.0),
        )
    }

    #[test]
    fn origin_maps_to_center() {
        let p = projection(0.7, 1.0e6);
        let d = p.world_to_device(p.origin);
        assert!((d - Vec2::new(400.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn world_y_points_up_on_screen() {
        let p = projection(0.0, 1.0e6);
        let above = p.world_to_device(p.origin + Vector::new(0.0, 1.0e6));
        assert!((above - Vec2::new(400.0, 180.0)).length() < 1e-3);
        let right = p.world_to_device(p.origin + Vector::new(1.0e6, 0.0));
        assert!((right - Vec2::new(496.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn rotation_puts_heading_up() {
        // Looking along heading 90° (world +X), world +X should appear straight up.
        let p = projection(FRAC_PI_2, 1.0e6);
        let ahead = p.world_to_device(p.origin + Vector::new(1.0e6, 0.0));
        assert!((ahead - Vec2::new(400.0, 180.0)).length() < 1e-3);
    }

    #[test]
    fn round_trip_within_tolerance() {
        for (rotation, scale) in [(0.0, 1.0e6), (0.3, 2.5e4), (-2.1, 7.0e8), (3.0, 1.0)] {
            let p = projection(rotation, scale);
            for offset in [
                Vector::new(0.0, 0.0),
                Vector::new(1.0, 2.0),
                Vector::new(-3.5, 0.25),
                Vector::new(2.0, -4.0),
            ] {
                let w = p.origin + offset * scale;
                let back = p.device_to_world(p.world_to_device(w));
                // f32 device precision bounds the error relative to one pixel.
                let tolerance = scale / 96.0 * 1e-3;
                assert!(
                    (back - w).length() <= tolerance,
                    "rotation {rotation} scale {scale}: {w:?} -> {back:?}"
                );
            }
        }
    }

    #[test]
    fn far_points_clamp_to_bound_along_same_direction() {
        let p = projection(0.4, 1.0);
        let w = p.origin + Vector::new(3.0e9, 1.0e9);
        let clamped = p.world_to_device(w).as_dvec2();

        let raw = ((w - p.origin) / p.world_scale).rotated(-p.rotation);
        let unclamped = DVec2::new(raw.x * p.dpi.x + p.center.x, -raw.y * p.dpi.y + p.center.y);

        let radius = clamped.x.abs().max(clamped.y.abs());
        let bound = SAFE_INT_MAX as f64;
        assert!((radius - bound).abs() <= bound * 1e-6, "radius {radius}");
        let cross = clamped.perp_dot(unclamped) / (clamped.length() * unclamped.length());
        assert!(cross.abs() < 1e-6);
        assert!(clamped.dot(unclamped) > 0.0);
    }

    #[test]
    fn scalar_saturates_instead_of_redirecting() {
        let p = projection(0.0, 1.0);
        assert_eq!(p.world_to_device_scalar(96.0, 1.0e12), SAFE_INT_MAX as f32);
        assert_eq!(p.world_to_device_scalar(96.0, -1.0e12), SAFE_INT_MIN as f32);
        assert_eq!(p.world_to_device_scalar(96.0, 0.5), 48.0);
        let both = p.world_to_device_scalars(2.0);
        assert_eq!(both, Vec2::new(192.0, 240.0));
    }

    #[test]
    fn safe_bounds_are_seven_eighths() {
        assert_eq!(SAFE_INT_MAX, 1_879_048_185);
        assert_eq!(SAFE_INT_MIN, -1_879_048_192);
    }
}
