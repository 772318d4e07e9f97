use super::Viewport;

/// Column-major 4x4 matrix, laid out the way WGSL `mat4x4<f32>` expects.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    /// Left-handed orthographic projection with depth mapped to `[0, 1]`.
    ///
    /// Passing `top < bottom` (e.g. `top = 0`, `bottom = height`) yields a +Y-down
    /// pixel space.
    pub fn orthographic_lh_z01(
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let rl = right - left;
        let tb = top - bottom;
        let fnr = far - near;
        Self {
            cols: [
                [2.0 / rl, 0.0, 0.0, 0.0],
                [0.0, 2.0 / tb, 0.0, 0.0],
                [0.0, 0.0, 1.0 / fnr, 0.0],
                [-(right + left) / rl, -(top + bottom) / tb, -near / fnr, 1.0],
            ],
        }
    }

    /// Projection mapping a logical viewport (top-left origin, +Y down) onto NDC.
    pub fn viewport_projection(viewport: Viewport) -> Self {
        let w = viewport.width.max(1.0);
        let h = viewport.height.max(1.0);
        Self::orthographic_lh_z01(0.0, w, 0.0, h, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(m: &Mat4, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        for (row, o) in out.iter_mut().enumerate() {
            *o = (0..4).map(|c| m.cols[c][row] * v[c]).sum();
        }
        out
    }

    fn approx(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn viewport_corners_map_to_ndc() {
        let m = Mat4::viewport_projection(Viewport::new(480.0, 270.0));
        assert!(approx(transform(&m, [0.0, 0.0, 0.0, 1.0]), [-1.0, 1.0, 0.0, 1.0]));
        assert!(approx(transform(&m, [480.0, 270.0, 0.0, 1.0]), [1.0, -1.0, 0.0, 1.0]));
        assert!(approx(transform(&m, [240.0, 135.0, 0.0, 1.0]), [0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn depth_maps_near_far_to_unit_range() {
        let m = Mat4::orthographic_lh_z01(-1.0, 1.0, 1.0, -1.0, 2.0, 10.0);
        assert!((transform(&m, [0.0, 0.0, 2.0, 1.0])[2]).abs() < 1e-6);
        assert!((transform(&m, [0.0, 0.0, 10.0, 1.0])[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn layout_is_sixty_four_bytes() {
        assert_eq!(std::mem::size_of::<Mat4>(), 64);
    }
}
