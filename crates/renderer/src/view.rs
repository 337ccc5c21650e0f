//! Viewport state and the surface it is drawn on.

use glam::Vec2;
use space_core::{nearly_equal, GridError, Projection, Vector};

use crate::canvas::Rect;
use crate::options::DisplayOptions;

/// Multiplier applied to the world scale by one zoom step.
pub const ZOOM_STEP: f64 = 2.0;

/// Device surface geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Pixels per inch, per axis.
    pub dpi: Vec2,
    pub rect: Rect,
}

impl Surface {
    pub fn new(width: f32, height: f32, dpi: Vec2) -> Self {
        Self {
            dpi,
            rect: Rect::new(0.0, 0.0, width, height),
        }
    }
}

/// Pan, rotation, zoom and grid settings of the display.
///
/// Every setter requests a redraw, but only when the value actually changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    world_scale: f64,
    origin: Vector,
    rotation: f64,
    polar: bool,
    static_grid: bool,
    options: DisplayOptions,
    redraw_requested: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            world_scale: 1.0e6,
            origin: Vector::ZERO,
            rotation: 0.0,
            polar: false,
            static_grid: true,
            options: DisplayOptions::empty(),
            redraw_requested: true,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn world_scale(&self) -> f64 {
        self.world_scale
    }

    pub fn origin(&self) -> Vector {
        self.origin
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn polar(&self) -> bool {
        self.polar
    }

    pub fn static_grid(&self) -> bool {
        self.static_grid
    }

    pub fn options(&self) -> DisplayOptions {
        self.options
    }

    /// Kilometres per device inch. Must be positive.
    pub fn set_world_scale(&mut self, world_scale: f64) -> Result<(), GridError> {
        if !(world_scale > 0.0) || !world_scale.is_finite() {
            log::warn!("Rejected world scale {}", world_scale);
            return Err(GridError::ScaleOutOfRange { value: world_scale });
        }
        if world_scale != self.world_scale {
            self.world_scale = world_scale;
            self.request_redraw();
        }
        Ok(())
    }

    pub fn set_origin(&mut self, origin: Vector) {
        if origin != self.origin {
            self.origin = origin;
            self.request_redraw();
        }
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        if !nearly_equal(rotation, self.rotation) {
            self.rotation = rotation;
            self.request_redraw();
        }
    }

    pub fn set_polar(&mut self, polar: bool) {
        if polar != self.polar {
            self.polar = polar;
            self.request_redraw();
        }
    }

    pub fn set_static_grid(&mut self, static_grid: bool) {
        if static_grid != self.static_grid {
            self.static_grid = static_grid;
            self.request_redraw();
        }
    }

    pub fn set_options(&mut self, options: DisplayOptions) {
        if options != self.options {
            self.options = options;
            self.request_redraw();
        }
    }

    /// Halve the world scale, showing less of the world. The scale is left
    /// unchanged if the step would underflow to zero.
    pub fn zoom_in(&mut self) -> Result<(), GridError> {
        self.set_world_scale(self.world_scale / ZOOM_STEP)
    }

    /// Double the world scale.
    pub fn zoom_out(&mut self) -> Result<(), GridError> {
        self.set_world_scale(self.world_scale * ZOOM_STEP)
    }

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw_requested
    }

    /// Clear the pending redraw request, returning whether one was pending.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Projection for drawing onto `surface`, centred on the surface.
    pub fn projection(&self, surface: &Surface) -> Projection {
        Projection::new(
            self.origin,
            self.rotation,
            self.world_scale,
            surface.dpi,
            surface.rect.center(),
        )
    }
}
