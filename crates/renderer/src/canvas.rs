//! Device-space drawing primitives and the canvas they are emitted to.

use glam::Vec2;

/// RGBA colour, components in `0..=1`.
pub type Color = [f32; 4];

/// Named colours used by the default palette.
pub mod colors {
    use super::Color;

    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const NAVY: Color = [0.0, 0.0, 0.5, 1.0];
    pub const FIREBRICK: Color = [0.698, 0.133, 0.133, 1.0];
    pub const DARK_GRAY: Color = [0.663, 0.663, 0.663, 1.0];
    pub const DARK_RED: Color = [0.545, 0.0, 0.0, 1.0];
    pub const DARK_GREEN: Color = [0.0, 0.392, 0.0, 1.0];
}

/// Stroke style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub width: f32,
}

impl Pen {
    pub const fn new(color: Color) -> Self {
        Self { color, width: 1.0 }
    }

    pub const fn with_width(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Axis-aligned device rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of half-size `radius` around `center`.
    pub fn centered(center: Vec2, radius: Vec2) -> Self {
        Self::new(
            center.x - radius.x,
            center.y - radius.y,
            2.0 * radius.x,
            2.0 * radius.y,
        )
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open containment: left/top edges inside, right/bottom edges outside.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.x <= x && x < self.right() && self.y <= y && y < self.bottom()
    }

    /// Strict overlap test; rectangles that only touch do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        other.x < self.right()
            && self.x < other.right()
            && other.y < self.bottom()
            && self.y < other.bottom()
    }
}

/// One drawing operation in device pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        pen: Pen,
        from: Vec2,
        to: Vec2,
    },
    Polyline {
        pen: Pen,
        points: Vec<Vec2>,
    },
    /// Closed outline.
    Polygon {
        pen: Pen,
        points: Vec<Vec2>,
    },
    Ellipse {
        pen: Pen,
        bounds: Rect,
    },
    /// Pie slice of the ellipse inscribed in `bounds`. Angles are degrees,
    /// clockwise from +X in device space.
    Pie {
        pen: Pen,
        bounds: Rect,
        start_degrees: f32,
        sweep_degrees: f32,
    },
    Rectangle {
        pen: Pen,
        bounds: Rect,
    },
    Fill {
        color: Color,
        bounds: Rect,
    },
    Text {
        color: Color,
        position: Vec2,
        text: String,
    },
}

/// Sink for drawing commands. Implemented by recorders and real backends.
pub trait Canvas {
    fn draw(&mut self, command: DrawCommand);
}

/// Records commands in order for later replay or tessellation.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of recorded commands matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }

    /// Replay every recorded command onto another canvas.
    pub fn replay(&self, canvas: &mut impl Canvas) {
        for command in &self.commands {
            canvas.draw(command.clone());
        }
    }
}

impl Canvas for DrawList {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}
