//! Background grid in cartesian and polar modes.
//!
//! Grid lines are one decade of world distance apart, so the on-screen
//! spacing lies between one and ten inches whatever the scale. With a static
//! grid the lines stay attached to round world coordinates while the origin
//! pans; otherwise they stay attached to the viewport centre.

use glam::{DVec2, Vec2};
use space_core::Projection;
use std::f64::consts::TAU;

use crate::canvas::{Canvas, Pen, Rect};
use crate::visibility::Culler;

/// Spokes drawn from the centre in polar mode (and again, offset by half a
/// step, from the second ring outwards).
pub const POLAR_SPOKES: usize = 12;

/// Ratio of the next power of ten above `world_scale` to `world_scale`, in `[1, 10)`.
pub fn grid_spacing_factor(world_scale: f64) -> f64 {
    let log = world_scale.log10();
    10f64.powf(log.ceil() - log)
}

/// `x - y * round(x / y)` with ties to even, as IEEE 754 defines remainder.
pub fn ieee_remainder(x: f64, y: f64) -> f64 {
    x - y * (x / y).round_ties_even()
}

/// Device point the grid is centred on.
pub fn grid_anchor(projection: &Projection, static_grid: bool) -> DVec2 {
    let mut anchor = projection.center;
    if static_grid {
        let period = projection.world_scale * grid_spacing_factor(projection.world_scale);
        anchor.x -= projection.dpi.x * ieee_remainder(projection.origin.x, period)
            / projection.world_scale;
        anchor.y += projection.dpi.y * ieee_remainder(projection.origin.y, period)
            / projection.world_scale;
    }
    anchor
}

/// Device-space grid primitives for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridGeometry {
    pub lines: Vec<(Vec2, Vec2)>,
    /// Polar rings, as ellipse bounds.
    pub rings: Vec<Rect>,
}

impl GridGeometry {
    /// Axis-aligned lines covering `client`.
    pub fn cartesian(projection: &Projection, client: Rect, static_grid: bool) -> Self {
        let factor = grid_spacing_factor(projection.world_scale);
        let spacing = projection.dpi * factor;
        let anchor = grid_anchor(projection, static_grid);
        let width = client.width as f64;
        let height = client.height as f64;
        let (top, bottom) = (client.top() as f64, client.bottom() as f64);
        let (left, right) = (client.left() as f64, client.right() as f64);

        let mut lines = Vec::new();
        let nx = (width / (2.0 * spacing.x)).ceil() as i64 + 1;
        for i in -nx..=nx {
            let x = anchor.x + i as f64 * spacing.x;
            lines.push((
                DVec2::new(x, top).as_vec2(),
                DVec2::new(x, bottom).as_vec2(),
            ));
        }
        let ny = (height / (2.0 * spacing.y)).ceil() as i64 + 1;
        for i in -ny..=ny {
            let y = anchor.y + i as f64 * spacing.y;
            lines.push((
                DVec2::new(left, y).as_vec2(),
                DVec2::new(right, y).as_vec2(),
            ));
        }
        Self {
            lines,
            rings: Vec::new(),
        }
    }

    /// Concentric rings plus primary and secondary spokes, always centred on
    /// the projection centre.
    pub fn polar(projection: &Projection, client: Rect) -> Self {
        let factor = grid_spacing_factor(projection.world_scale);
        let spacing = projection.dpi * factor;
        let anchor = projection.center;
        let n = ring_count(client, spacing);

        let rings = (1..=n)
            .map(|i| {
                let radius = spacing * i as f64;
                Rect::centered(anchor.as_vec2(), radius.as_vec2())
            })
            .collect();

        let spoke = |angle: f64, radius: f64| {
            let (sin, cos) = angle.sin_cos();
            (anchor + DVec2::new(cos * spacing.x, sin * spacing.y) * radius).as_vec2()
        };
        let outer = n as f64;
        let mut lines = Vec::with_capacity(2 * POLAR_SPOKES);
        for i in 0..POLAR_SPOKES {
            let angle = TAU * i as f64 / POLAR_SPOKES as f64;
            lines.push((anchor.as_vec2(), spoke(angle, outer)));
        }
        for i in 0..POLAR_SPOKES {
            let angle = TAU * (i as f64 + 0.5) / POLAR_SPOKES as f64;
            lines.push((spoke(angle, 2.0), spoke(angle, outer)));
        }
        Self { lines, rings }
    }
}

/// Number of polar rings, never fewer than two.
fn ring_count(client: Rect, spacing: DVec2) -> usize {
    let n = (client.width as f64 / (2.0 * spacing.x) + client.height as f64 / (2.0 * spacing.y))
        .trunc();
    (n.max(2.0)) as usize
}

/// Draw `geometry` through the culler.
pub fn draw_grid<C: Canvas + ?Sized>(culler: &mut Culler<'_, C>, geometry: &GridGeometry, pen: Pen) {
    for ring in &geometry.rings {
        culler.ellipse(pen, *ring);
    }
    for (from, to) in &geometry.lines {
        culler.line(pen, *from, *to);
    }
}
