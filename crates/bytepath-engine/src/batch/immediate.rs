use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Color;

/// Topology family of an immediate primitive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveKind {
    /// Connected polyline; drawn as a line strip.
    Line,
    /// Independent triangles, three vertices each; drawn as a triangle list.
    Triangle,
}

/// Vertex as uploaded to the immediate pipeline (24 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec2,
    pub color: Color,
}

/// One contiguous run of vertices sharing topology and fill mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub kind: PrimitiveKind,
    /// Half-open range into [`ImmediateBatch::vertices`].
    pub vertices: Range<u32>,
    /// `false` renders triangles as wireframe. Always `true` for lines.
    pub filled: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum RecordState {
    Idle,
    Recording {
        kind: PrimitiveKind,
        start: u32,
        filled: bool,
    },
}

/// Immediate-mode line/triangle batch.
///
/// Vertices are only accepted inside a `begin_primitive` / `end_primitive` scope.
/// Closing a scope turns its vertices into one [`DrawCall`]; scopes that pushed
/// nothing are dropped.
///
/// ```ignore
/// batch.begin_primitive(PrimitiveKind::Triangle, true);
/// batch.set_color(Color::RED);
/// batch.push_vertex(a);
/// batch.push_vertex(b);
/// batch.push_vertex(c);
/// batch.end_primitive();
/// ```
#[derive(Debug)]
pub struct ImmediateBatch {
    vertices: Vec<Vertex>,
    draw_calls: Vec<DrawCall>,
    state: RecordState,
    color: Color,
}

impl Default for ImmediateBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ImmediateBatch {
    pub const VERTEX_CAPACITY: usize = 8192;
    pub const DRAW_CALL_CAPACITY: usize = 2048;

    /// Angular step of [`push_circle_outline`](Self::push_circle_outline), in degrees.
    pub const CIRCLE_STEP_DEGREES: u32 = 6;
    pub const CIRCLE_SEGMENTS: u32 = 360 / Self::CIRCLE_STEP_DEGREES;

    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(Self::VERTEX_CAPACITY),
            draw_calls: Vec::with_capacity(Self::DRAW_CALL_CAPACITY),
            state: RecordState::Idle,
            color: Color::TRANSPARENT,
        }
    }

    /// Drops all vertices and draw calls and abandons any open scope.
    ///
    /// The current color is kept.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.draw_calls.clear();
        self.state = RecordState::Idle;
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    #[inline]
    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecordState::Recording { .. })
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Opens a primitive scope.
    ///
    /// Lines ignore `filled` and always record `true`.
    ///
    /// # Panics
    /// Panics if a scope is already open or the draw call list is full.
    pub fn begin_primitive(&mut self, kind: PrimitiveKind, filled: bool) {
        assert!(
            !self.is_recording(),
            "ImmediateBatch::begin_primitive: a primitive is already being recorded"
        );
        assert!(
            self.draw_calls.len() < Self::DRAW_CALL_CAPACITY,
            "ImmediateBatch::begin_primitive: capacity of {} draw calls exceeded",
            Self::DRAW_CALL_CAPACITY
        );

        let filled = match kind {
            PrimitiveKind::Line => true,
            PrimitiveKind::Triangle => filled,
        };

        self.state = RecordState::Recording {
            kind,
            start: self.vertices.len() as u32,
            filled,
        };
    }

    /// Sets the color of subsequently pushed vertices and returns the previous one.
    #[inline]
    pub fn set_color(&mut self, color: Color) -> Color {
        std::mem::replace(&mut self.color, color)
    }

    /// # Panics
    /// Panics outside a primitive scope or when the vertex array is full.
    pub fn push_vertex(&mut self, position: Vec2) {
        assert!(
            self.is_recording(),
            "ImmediateBatch::push_vertex: no primitive is being recorded"
        );
        assert!(
            self.vertices.len() < Self::VERTEX_CAPACITY,
            "ImmediateBatch::push_vertex: capacity of {} vertices exceeded",
            Self::VERTEX_CAPACITY
        );
        self.vertices.push(Vertex {
            position,
            color: self.color,
        });
    }

    /// Closes the open scope, appending a draw call if it recorded any vertex.
    ///
    /// # Panics
    /// Panics if no scope is open.
    pub fn end_primitive(&mut self) {
        let RecordState::Recording { kind, start, filled } = self.state else {
            panic!("ImmediateBatch::end_primitive: no primitive is being recorded");
        };
        self.state = RecordState::Idle;

        let end = self.vertices.len() as u32;
        if start < end {
            self.draw_calls.push(DrawCall {
                kind,
                vertices: start..end,
                filled,
            });
        }
    }

    /// Records a single two-vertex line in its own scope.
    ///
    /// # Panics
    /// Panics if called while another primitive is being recorded.
    pub fn push_line(&mut self, start: Vec2, end: Vec2, color: Color) {
        self.begin_primitive(PrimitiveKind::Line, true);
        let previous = self.set_color(color);
        self.push_vertex(start);
        self.push_vertex(end);
        self.set_color(previous);
        self.end_primitive();
    }

    /// Records a circle outline as one line strip of
    /// [`CIRCLE_SEGMENTS`](Self::CIRCLE_SEGMENTS) perimeter vertices, starting at angle 0.
    ///
    /// The strip is not closed: the last vertex sits one step short of the first.
    pub fn push_circle_outline(&mut self, center: Vec2, color: Color, radius: f32) {
        self.begin_primitive(PrimitiveKind::Line, true);
        let previous = self.set_color(color);

        let step = (Self::CIRCLE_STEP_DEGREES as f32).to_radians();
        for i in 0..Self::CIRCLE_SEGMENTS {
            let theta = i as f32 * step;
            self.push_vertex(center + Vec2::from_angle(theta) * radius);
        }

        self.set_color(previous);
        self.end_primitive();
    }
}
