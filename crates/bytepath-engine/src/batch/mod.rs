//! Per-frame draw batches.
//!
//! Responsibilities:
//! - collect renderer-agnostic primitives for a single frame
//! - enforce fixed capacities so GPU buffers can be sized once at startup
//! - stay free of GPU resources; renderers copy batch contents out each frame
//!
//! Both batches are append-only between `clear()` calls. Capacity overflow and
//! begin/end misuse are caller bugs and panic.

mod immediate;
mod quad;

pub use immediate::{DrawCall, ImmediateBatch, PrimitiveKind, Vertex};
pub use quad::{CornerColors, Quad, QuadBatch};
