use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Color;

/// Per-corner colors of a quad.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CornerColors {
    pub top_left: Color,
    pub top_right: Color,
    pub bottom_right: Color,
    pub bottom_left: Color,
}

impl CornerColors {
    #[inline]
    pub const fn uniform(color: Color) -> Self {
        Self {
            top_left: color,
            top_right: color,
            bottom_right: color,
            bottom_left: color,
        }
    }
}

/// One rounded rectangle, as consumed by the quad shader.
///
/// Layout (96 bytes, read as `array<Quad>` from a storage buffer):
///
///  offset  0  origin     vec2
///  offset  8  x_axis     vec2
///  offset 16  y_axis     vec2
///  offset 24  colors     4 × vec4, triangle-strip order (tl, tr, bl, br)
///  offset 88  roundness  f32
///  offset 92  thickness  f32
///
/// `roundness` is a rounding radius clamped in the shader to half the shorter side,
/// so a square whose roundness equals its half-extent renders as a circle.
/// `thickness == 0` fills the shape; `thickness > 0` strokes its outline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Quad {
    pub origin: Vec2,
    pub x_axis: Vec2,
    pub y_axis: Vec2,
    pub colors: [Color; 4],
    pub roundness: f32,
    pub thickness: f32,
}

impl Quad {
    #[inline]
    pub fn top_left(&self) -> Color {
        self.colors[0]
    }

    #[inline]
    pub fn top_right(&self) -> Color {
        self.colors[1]
    }

    #[inline]
    pub fn bottom_left(&self) -> Color {
        self.colors[2]
    }

    #[inline]
    pub fn bottom_right(&self) -> Color {
        self.colors[3]
    }
}

/// Fixed-capacity batch of quads drawn with a single instanced call.
#[derive(Debug)]
pub struct QuadBatch {
    quads: Vec<Quad>,
}

impl Default for QuadBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadBatch {
    pub const CAPACITY: usize = 4096;

    pub fn new() -> Self {
        Self {
            quads: Vec::with_capacity(Self::CAPACITY),
        }
    }

    /// Drops all quads. Keeps the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.quads.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    #[inline]
    pub fn as_slice(&self) -> &[Quad] {
        &self.quads
    }

    /// Reserves the next slot and returns it zeroed.
    ///
    /// # Panics
    /// Panics if the batch already holds [`QuadBatch::CAPACITY`] quads.
    pub fn acquire(&mut self) -> &mut Quad {
        assert!(
            self.quads.len() < Self::CAPACITY,
            "QuadBatch::acquire: capacity of {} quads exceeded",
            Self::CAPACITY
        );
        let idx = self.quads.len();
        self.quads.push(Quad::zeroed());
        &mut self.quads[idx]
    }

    pub fn push(
        &mut self,
        origin: Vec2,
        x_axis: Vec2,
        y_axis: Vec2,
        colors: CornerColors,
        roundness: f32,
        thickness: f32,
    ) -> &mut Quad {
        let quad = self.acquire();
        quad.origin = origin;
        quad.x_axis = x_axis;
        quad.y_axis = y_axis;
        quad.colors = [
            colors.top_left,
            colors.top_right,
            colors.bottom_left,
            colors.bottom_right,
        ];
        quad.roundness = roundness;
        quad.thickness = thickness;
        quad
    }

    /// Axis-aligned filled rectangle with top-left corner at `origin`.
    #[inline]
    pub fn push_rect_filled(
        &mut self,
        origin: Vec2,
        dims: Vec2,
        color: Color,
        roundness: f32,
    ) -> &mut Quad {
        self.push_rect_outline(origin, dims, color, roundness, 0.0)
    }

    #[inline]
    pub fn push_rect_outline(
        &mut self,
        origin: Vec2,
        dims: Vec2,
        color: Color,
        roundness: f32,
        thickness: f32,
    ) -> &mut Quad {
        self.push(
            origin,
            Vec2::new(dims.x, 0.0),
            Vec2::new(0.0, dims.y),
            CornerColors::uniform(color),
            roundness,
            thickness,
        )
    }

    #[inline]
    pub fn push_circle_filled(&mut self, center: Vec2, color: Color, radius: f32) -> &mut Quad {
        self.push_circle_outline(center, color, radius, 0.0)
    }

    /// Circle as a square of side `2 * radius` whose roundness equals its half-extent.
    #[inline]
    pub fn push_circle_outline(
        &mut self,
        center: Vec2,
        color: Color,
        radius: f32,
        thickness: f32,
    ) -> &mut Quad {
        self.push_rect_outline(
            center - Vec2::splat(radius),
            Vec2::splat(radius * 2.0),
            color,
            radius,
            thickness,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn quad_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<Quad>(), 96);
        assert_eq!(std::mem::offset_of!(Quad, colors), 24);
        assert_eq!(std::mem::offset_of!(Quad, roundness), 88);
        assert_eq!(std::mem::offset_of!(Quad, thickness), 92);
    }

    // ── push helpers ──────────────────────────────────────────────────────

    #[test]
    fn rect_filled_fields() {
        let mut batch = QuadBatch::new();
        let q = *batch.push_rect_filled(Vec2::new(10.0, 20.0), Vec2::new(6.0, 50.0), Color::RED, 2.0);

        assert_eq!(q.origin, Vec2::new(10.0, 20.0));
        assert_eq!(q.x_axis, Vec2::new(6.0, 0.0));
        assert_eq!(q.y_axis, Vec2::new(0.0, 50.0));
        assert_eq!(q.colors, [Color::RED; 4]);
        assert_eq!(q.roundness, 2.0);
        assert_eq!(q.thickness, 0.0);
    }

    #[test]
    fn rect_outline_keeps_thickness() {
        let mut batch = QuadBatch::new();
        let q = *batch.push_rect_outline(Vec2::zero(), Vec2::new(4.0, 8.0), Color::WHITE, 1.0, 1.5);
        assert_eq!(q.thickness, 1.5);
        assert_eq!(q.roundness, 1.0);
    }

    #[test]
    fn circle_filled_derives_square() {
        let mut batch = QuadBatch::new();
        let q = *batch.push_circle_filled(Vec2::new(100.0, 50.0), Color::WHITE, 10.0);

        assert_eq!(q.origin, Vec2::new(90.0, 40.0));
        assert_eq!(q.x_axis, Vec2::new(20.0, 0.0));
        assert_eq!(q.y_axis, Vec2::new(0.0, 20.0));
        assert_eq!(q.roundness, 10.0);
        assert_eq!(q.thickness, 0.0);
    }

    #[test]
    fn circle_outline_derives_square_with_stroke() {
        let mut batch = QuadBatch::new();
        let q = *batch.push_circle_outline(Vec2::new(0.0, 0.0), Color::RED, 4.0, 1.0);

        assert_eq!(q.origin, Vec2::new(-4.0, -4.0));
        assert_eq!(q.x_axis, Vec2::new(8.0, 0.0));
        assert_eq!(q.roundness, 4.0);
        assert_eq!(q.thickness, 1.0);
    }

    #[test]
    fn corner_colors_stored_in_strip_order() {
        let tl = Color::from_premul(0.1, 0.0, 0.0, 1.0);
        let tr = Color::from_premul(0.2, 0.0, 0.0, 1.0);
        let br = Color::from_premul(0.3, 0.0, 0.0, 1.0);
        let bl = Color::from_premul(0.4, 0.0, 0.0, 1.0);

        let mut batch = QuadBatch::new();
        let q = *batch.push(
            Vec2::zero(),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            CornerColors { top_left: tl, top_right: tr, bottom_right: br, bottom_left: bl },
            0.0,
            0.0,
        );

        assert_eq!(q.colors, [tl, tr, bl, br]);
        assert_eq!(q.bottom_right(), br);
        assert_eq!(q.bottom_left(), bl);
    }

    #[test]
    fn acquire_returns_mutable_slot() {
        let mut batch = QuadBatch::new();
        batch.acquire().roundness = 3.0;
        assert_eq!(batch.as_slice()[0].roundness, 3.0);
    }

    // ── counting / capacity ───────────────────────────────────────────────

    #[test]
    fn count_tracks_pushes_up_to_capacity() {
        let mut batch = QuadBatch::new();
        for i in 0..QuadBatch::CAPACITY {
            if i % 2 == 0 {
                batch.push_rect_filled(Vec2::new(i as f32, 0.0), Vec2::splat(1.0), Color::WHITE, 0.0);
            } else {
                batch.push_circle_filled(Vec2::new(i as f32, 0.0), Color::WHITE, 2.0);
            }
            assert_eq!(batch.len(), i + 1);
        }

        let last = batch.as_slice()[QuadBatch::CAPACITY - 1];
        let i = (QuadBatch::CAPACITY - 1) as f32;
        assert_eq!(last.origin, Vec2::new(i - 2.0, -2.0));
        assert_eq!(last.roundness, 2.0);
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn overflow_panics() {
        let mut batch = QuadBatch::new();
        for _ in 0..=QuadBatch::CAPACITY {
            batch.acquire();
        }
    }

    #[test]
    fn clear_resets_count() {
        let mut batch = QuadBatch::new();
        batch.push_circle_filled(Vec2::zero(), Color::WHITE, 1.0);
        batch.clear();
        assert!(batch.is_empty());
        assert_eq!(batch.capacity(), QuadBatch::CAPACITY);
    }
}
