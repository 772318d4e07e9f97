use std::collections::HashMap;
use std::ops::Range;

use crate::batch::{DrawCall, ImmediateBatch, PrimitiveKind, Vertex};
use crate::render::{RenderCtx, RenderTarget};

use super::common::{
    create_projection_ubo, premul_alpha_blend, projection_ubo_layout_entry, write_projection_ubo,
};

/// GPU topology an immediate draw is issued with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    LineStrip,
    TriangleList,
}

/// Rasterizer fill mode of an immediate draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FillMode {
    Solid,
    Wireframe,
}

/// One non-indexed GPU draw derived from a [`DrawCall`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmediateDraw {
    pub topology: Topology,
    pub fill: FillMode,
    /// Range into the uploaded vertex buffer.
    pub vertices: Range<u32>,
}

/// Number of vertices drawn for a call whose recorded range is degenerate.
pub const DEGENERATE_FALLBACK_VERTICES: u32 = 2;

/// Translates recorded draw calls into GPU draws, in append order.
///
/// Degenerate ranges (`end <= start`) fall back to a
/// [`DEGENERATE_FALLBACK_VERTICES`]-vertex draw from `start`, clamped to
/// `vertex_count`. Calls that end up with no vertex at all are skipped.
pub fn plan_immediate_draws(
    calls: &[DrawCall],
    vertex_count: u32,
) -> impl Iterator<Item = ImmediateDraw> + '_ {
    calls.iter().filter_map(move |call| {
        let start = call.vertices.start;
        let end = if call.vertices.end > start {
            call.vertices.end
        } else {
            start.saturating_add(DEGENERATE_FALLBACK_VERTICES)
        };
        let end = end.min(vertex_count);
        if start >= end {
            return None;
        }

        let topology = match call.kind {
            PrimitiveKind::Line => Topology::LineStrip,
            PrimitiveKind::Triangle => Topology::TriangleList,
        };
        let fill = if call.filled { FillMode::Solid } else { FillMode::Wireframe };

        Some(ImmediateDraw {
            topology,
            fill,
            vertices: start..end,
        })
    })
}

/// Renderer for [`ImmediateBatch`].
///
/// All vertices are uploaded once per frame into a buffer sized for
/// [`ImmediateBatch::VERTEX_CAPACITY`]; each draw call then becomes one
/// non-indexed draw over its own vertex range. Pipelines are created lazily per
/// `(Topology, FillMode)`.
///
/// Wireframe needs `Features::POLYGON_MODE_LINE`; without it wireframe draws fall
/// back to solid fill.
#[derive(Default)]
pub struct ImmediateRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipelines: HashMap<(Topology, FillMode), wgpu::RenderPipeline>,
    shader: Option<wgpu::ShaderModule>,
    pipeline_layout: Option<wgpu::PipelineLayout>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    projection_ubo: Option<wgpu::Buffer>,
    vertex_vbo: Option<wgpu::Buffer>,

    warned_no_wireframe: bool,
}

impl ImmediateRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        batch: &ImmediateBatch,
    ) {
        if batch.draw_calls().is_empty() || batch.vertices().is_empty() {
            return;
        }
        debug_assert!(!batch.is_recording(), "ImmediateBatch rendered with an open primitive");

        self.ensure_layout(ctx);
        self.ensure_bindings(ctx);

        let wireframe = ctx.supports_wireframe();
        if !wireframe && !self.warned_no_wireframe {
            log::warn!("POLYGON_MODE_LINE unsupported; wireframe primitives drawn filled");
            self.warned_no_wireframe = true;
        }

        let draws: Vec<ImmediateDraw> =
            plan_immediate_draws(batch.draw_calls(), batch.vertices().len() as u32)
                .map(|mut d| {
                    if !wireframe {
                        d.fill = FillMode::Solid;
                    }
                    d
                })
                .collect();

        for d in &draws {
            self.ensure_pipeline(ctx, d.topology, d.fill);
        }

        let Some(ubo) = self.projection_ubo.as_ref() else { return };
        let Some(vbo) = self.vertex_vbo.as_ref() else { return };
        write_projection_ubo(ctx, ubo);
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(batch.vertices()));

        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.begin_load_pass("bytepath immediate pass");
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));

        for d in draws {
            let Some(pipeline) = self.pipelines.get(&(d.topology, d.fill)) else { continue };
            rpass.set_pipeline(pipeline);
            rpass.draw(d.vertices, 0..1);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_layout(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline_layout.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("bytepath immediate shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/immediate.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("bytepath immediate bgl"),
                entries: &[projection_ubo_layout_entry(0)],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("bytepath immediate pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipelines.clear();
        self.shader = Some(shader);
        self.pipeline_layout = Some(pipeline_layout);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, topology: Topology, fill: FillMode) {
        if self.pipelines.contains_key(&(topology, fill)) {
            return;
        }
        let Some(shader) = self.shader.as_ref() else { return };
        let Some(layout) = self.pipeline_layout.as_ref() else { return };

        let label = format!("bytepath immediate pipeline {topology:?}/{fill:?}");
        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label.as_str()),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vertex_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: match topology {
                    Topology::LineStrip => wgpu::PrimitiveTopology::LineStrip,
                    Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
                },
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: match fill {
                    FillMode::Solid => wgpu::PolygonMode::Fill,
                    FillMode::Wireframe => wgpu::PolygonMode::Line,
                },
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipelines.insert((topology, fill), pipeline);
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let ubo = self
            .projection_ubo
            .get_or_insert_with(|| create_projection_ubo(ctx, "bytepath immediate projection ubo"));

        self.vertex_vbo.get_or_insert_with(|| {
            ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("bytepath immediate vbo"),
                size: (ImmediateBatch::VERTEX_CAPACITY * std::mem::size_of::<Vertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bytepath immediate bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        }));
    }
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x2, // position
    1 => Float32x4  // color
];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn call(kind: PrimitiveKind, vertices: Range<u32>, filled: bool) -> DrawCall {
        DrawCall { kind, vertices, filled }
    }

    // ── topology / fill mapping ───────────────────────────────────────────

    #[test]
    fn line_maps_to_strip_triangle_to_list() {
        let calls = [
            call(PrimitiveKind::Line, 0..2, true),
            call(PrimitiveKind::Triangle, 2..5, true),
        ];
        let draws: Vec<_> = plan_immediate_draws(&calls, 5).collect();
        assert_eq!(draws[0].topology, Topology::LineStrip);
        assert_eq!(draws[1].topology, Topology::TriangleList);
    }

    #[test]
    fn unfilled_triangles_are_wireframe() {
        let calls = [
            call(PrimitiveKind::Triangle, 0..3, false),
            call(PrimitiveKind::Triangle, 3..6, true),
        ];
        let draws: Vec<_> = plan_immediate_draws(&calls, 6).collect();
        assert_eq!(draws[0].fill, FillMode::Wireframe);
        assert_eq!(draws[1].fill, FillMode::Solid);
    }

    #[test]
    fn draws_follow_append_order_and_ranges() {
        let calls = [
            call(PrimitiveKind::Triangle, 0..6, false),
            call(PrimitiveKind::Line, 6..66, true),
            call(PrimitiveKind::Line, 66..68, true),
        ];
        let ranges: Vec<_> = plan_immediate_draws(&calls, 68).map(|d| d.vertices).collect();
        assert_eq!(ranges, vec![0..6, 6..66, 66..68]);
    }

    // ── degenerate ranges ─────────────────────────────────────────────────

    #[test]
    fn degenerate_range_falls_back_to_two_vertices() {
        let calls = [call(PrimitiveKind::Line, 4..4, true)];
        let draws: Vec<_> = plan_immediate_draws(&calls, 10).collect();
        assert_eq!(draws[0].vertices, 4..6);
    }

    #[test]
    fn degenerate_fallback_is_clamped_to_vertex_count() {
        let calls = [call(PrimitiveKind::Line, 9..3, true)];
        let draws: Vec<_> = plan_immediate_draws(&calls, 10).collect();
        assert_eq!(draws[0].vertices, 9..10);
    }

    #[test]
    fn call_past_uploaded_vertices_is_skipped() {
        let calls = [
            call(PrimitiveKind::Line, 12..12, true),
            call(PrimitiveKind::Line, 0..2, true),
        ];
        let draws: Vec<_> = plan_immediate_draws(&calls, 10).collect();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].vertices, 0..2);
    }

    // ── from a recorded batch ─────────────────────────────────────────────

    #[test]
    fn plans_recorded_batch() {
        let mut batch = ImmediateBatch::new();
        batch.begin_primitive(PrimitiveKind::Triangle, false);
        batch.push_vertex(Vec2::new(0.0, 0.0));
        batch.push_vertex(Vec2::new(1.0, 0.0));
        batch.push_vertex(Vec2::new(0.0, 1.0));
        batch.end_primitive();
        batch.push_circle_outline(Vec2::zero(), Color::WHITE, 16.0);
        batch.push_line(Vec2::zero(), Vec2::new(40.0, 0.0), Color::WHITE);

        let draws: Vec<_> =
            plan_immediate_draws(batch.draw_calls(), batch.vertices().len() as u32).collect();

        assert_eq!(
            draws,
            vec![
                ImmediateDraw { topology: Topology::TriangleList, fill: FillMode::Wireframe, vertices: 0..3 },
                ImmediateDraw { topology: Topology::LineStrip, fill: FillMode::Solid, vertices: 3..63 },
                ImmediateDraw { topology: Topology::LineStrip, fill: FillMode::Solid, vertices: 63..65 },
            ]
        );
    }
}
