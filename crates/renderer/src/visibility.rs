//! Culling of device-space primitives against the client area.

use glam::Vec2;

use crate::canvas::{Canvas, Color, DrawCommand, Pen, Rect};

/// Per-frame culling counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Primitives handed to the canvas.
    pub emitted: usize,
    /// Primitives dropped because they were off screen.
    pub culled: usize,
}

impl FrameStats {
    pub fn total(&self) -> usize {
        self.emitted + self.culled
    }
}

/// Visibility tests against the drawable client rectangle.
#[derive(Debug, Clone, Copy)]
pub struct ClientArea {
    rect: Rect,
}

impl ClientArea {
    /// The client rectangle is the surface shrunk by one pixel on the
    /// right and bottom edges.
    pub fn new(surface: Rect) -> Self {
        Self {
            rect: Rect::new(
                surface.x,
                surface.y,
                (surface.width - 1.0).max(0.0),
                (surface.height - 1.0).max(0.0),
            ),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn rect_visible(&self, rect: &Rect) -> bool {
        self.rect.intersects(rect)
    }

    /// Points are truncated to whole pixels before the containment test.
    pub fn point_visible(&self, p: Vec2) -> bool {
        self.rect.contains(p.x.trunc(), p.y.trunc())
    }

    /// Visible when any vertex is. A polygon that straddles the client area
    /// with every vertex outside is culled.
    pub fn polygon_visible(&self, points: &[Vec2]) -> bool {
        points.iter().any(|p| self.point_visible(*p))
    }
}

/// Canvas adaptor that drops invisible primitives and counts both outcomes.
pub struct Culler<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
    area: ClientArea,
    stats: FrameStats,
}

impl<'a, C: Canvas + ?Sized> Culler<'a, C> {
    pub fn new(canvas: &'a mut C, area: ClientArea) -> Self {
        Self {
            canvas,
            area,
            stats: FrameStats::default(),
        }
    }

    pub fn area(&self) -> &ClientArea {
        &self.area
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    fn emit(&mut self, visible: bool, command: DrawCommand) {
        if visible {
            self.stats.emitted += 1;
            self.canvas.draw(command);
        } else {
            self.stats.culled += 1;
        }
    }

    /// Emit without a visibility test. Used for the background.
    pub fn always(&mut self, command: DrawCommand) {
        self.emit(true, command);
    }

    pub fn line(&mut self, pen: Pen, from: Vec2, to: Vec2) {
        let visible = self.area.polygon_visible(&[from, to]);
        self.emit(visible, DrawCommand::Line { pen, from, to });
    }

    pub fn polyline(&mut self, pen: Pen, points: Vec<Vec2>) {
        let visible = self.area.polygon_visible(&points);
        self.emit(visible, DrawCommand::Polyline { pen, points });
    }

    pub fn polygon(&mut self, pen: Pen, points: Vec<Vec2>) {
        let visible = self.area.polygon_visible(&points);
        self.emit(visible, DrawCommand::Polygon { pen, points });
    }

    /// Ellipses with a non-positive radius are skipped without counting.
    pub fn ellipse(&mut self, pen: Pen, bounds: Rect) {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return;
        }
        let visible = self.area.rect_visible(&bounds);
        self.emit(visible, DrawCommand::Ellipse { pen, bounds });
    }

    pub fn pie(&mut self, pen: Pen, bounds: Rect, start_degrees: f32, sweep_degrees: f32) {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return;
        }
        let visible = self.area.rect_visible(&bounds);
        self.emit(
            visible,
            DrawCommand::Pie {
                pen,
                bounds,
                start_degrees,
                sweep_degrees,
            },
        );
    }

    pub fn rectangle(&mut self, pen: Pen, bounds: Rect) {
        let visible = self.area.rect_visible(&bounds);
        self.emit(visible, DrawCommand::Rectangle { pen, bounds });
    }

    pub fn text(&mut self, color: Color, position: Vec2, text: &str) {
        let visible = self.area.point_visible(position);
        self.emit(
            visible,
            DrawCommand::Text {
                color,
                position,
                text: text.to_string(),
            },
        );
    }
}
