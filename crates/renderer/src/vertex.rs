//! GPU-ready vertices for a recorded frame.
//!
//! [`Tessellator`] flattens a [`DrawList`] into NDC line and triangle lists
//! that can be uploaded with `wgpu` as-is. Text is left to the host's own
//! text pass and is only counted here.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::canvas::{Color, DrawCommand, DrawList, Rect};

/// Segments used to flatten a full ellipse.
pub const ELLIPSE_SEGMENTS: usize = 48;

/// Vertex for screen-space line and fill geometry.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    /// NDC position (x, y) in -1..1
    pub position: [f32; 2],
    /// RGBA color
    pub color: [f32; 4],
}

impl LineVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Output of [`Tessellator::tessellate`].
#[derive(Debug, Clone, Default)]
pub struct Tessellation {
    /// Pairs of vertices, one pair per segment (`PrimitiveTopology::LineList`).
    pub lines: Vec<LineVertex>,
    /// Triples of vertices (`PrimitiveTopology::TriangleList`).
    pub triangles: Vec<LineVertex>,
    /// Text commands not turned into geometry.
    pub skipped_text: usize,
}

/// Converts device-pixel draw commands into NDC vertices.
pub struct Tessellator {
    screen_w: f32,
    screen_h: f32,
    out: Tessellation,
}

impl Tessellator {
    pub fn new(screen_w: f32, screen_h: f32) -> Self {
        Self {
            screen_w: screen_w.max(1.0),
            screen_h: screen_h.max(1.0),
            out: Tessellation::default(),
        }
    }

    /// Convert pixel coords to NDC.
    fn px_to_ndc(&self, p: Vec2) -> [f32; 2] {
        [
            (p.x / self.screen_w) * 2.0 - 1.0,
            1.0 - (p.y / self.screen_h) * 2.0,
        ]
    }

    fn vertex(&self, p: Vec2, color: Color) -> LineVertex {
        LineVertex {
            position: self.px_to_ndc(p),
            color,
        }
    }

    fn segment(&mut self, a: Vec2, b: Vec2, color: Color) {
        let va = self.vertex(a, color);
        let vb = self.vertex(b, color);
        self.out.lines.push(va);
        self.out.lines.push(vb);
    }

    fn strip(&mut self, points: &[Vec2], color: Color, closed: bool) {
        for pair in points.windows(2) {
            self.segment(pair[0], pair[1], color);
        }
        if closed && points.len() > 2 {
            self.segment(points[points.len() - 1], points[0], color);
        }
    }

    /// Flatten every command of `list`.
    pub fn tessellate(mut self, list: &DrawList) -> Tessellation {
        for command in &list.commands {
            self.add(command);
        }
        self.out
    }

    fn add(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Line { pen, from, to } => self.segment(*from, *to, pen.color),
            DrawCommand::Polyline { pen, points } => self.strip(points, pen.color, false),
            DrawCommand::Polygon { pen, points } => self.strip(points, pen.color, true),
            DrawCommand::Ellipse { pen, bounds } => {
                let points = arc_points(bounds, 0.0, 360.0, ELLIPSE_SEGMENTS);
                self.strip(&points, pen.color, true);
            }
            DrawCommand::Pie {
                pen,
                bounds,
                start_degrees,
                sweep_degrees,
            } => {
                let segments = ((sweep_degrees.abs() / 360.0) * ELLIPSE_SEGMENTS as f32)
                    .ceil()
                    .max(1.0) as usize;
                let mut points = vec![bounds.center()];
                points.extend(arc_points(bounds, *start_degrees, *sweep_degrees, segments));
                self.strip(&points, pen.color, true);
            }
            DrawCommand::Rectangle { pen, bounds } => {
                self.strip(&corners(bounds), pen.color, true);
            }
            DrawCommand::Fill { color, bounds } => {
                let [tl, tr, br, bl] = corners(bounds).map(|p| self.vertex(p, *color));
                self.out.triangles.extend_from_slice(&[tl, tr, br, tl, br, bl]);
            }
            DrawCommand::Text { .. } => self.out.skipped_text += 1,
        }
    }
}

fn corners(r: &Rect) -> [Vec2; 4] {
    [
        Vec2::new(r.left(), r.top()),
        Vec2::new(r.right(), r.top()),
        Vec2::new(r.right(), r.bottom()),
        Vec2::new(r.left(), r.bottom()),
    ]
}

/// Points along the ellipse inscribed in `bounds`, clockwise on screen from
/// `start_degrees` (0 = +X) through `sweep_degrees`, both ends included.
fn arc_points(bounds: &Rect, start_degrees: f32, sweep_degrees: f32, segments: usize) -> Vec<Vec2> {
    let center = bounds.center();
    let radius = Vec2::new(bounds.width / 2.0, bounds.height / 2.0);
    (0..=segments)
        .map(|i| {
            let degrees = start_degrees + sweep_degrees * i as f32 / segments as f32;
            let (sin, cos) = degrees.to_radians().sin_cos();
            center + Vec2::new(radius.x * cos, radius.y * sin)
        })
        .collect()
}
