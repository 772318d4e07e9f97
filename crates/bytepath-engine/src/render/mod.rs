//! GPU rendering subsystem.
//!
//! Renderers consume the per-frame batches and issue GPU commands via wgpu.
//! Each renderer is responsible for its own GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using an orthographic projection uniform.

mod common;
mod ctx;
mod immediate;
mod quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use immediate::{
    plan_immediate_draws, FillMode, ImmediateDraw, ImmediateRenderer, Topology,
    DEGENERATE_FALLBACK_VERTICES,
};
pub use quad::QuadRenderer;
