//! bytepath engine crate.
//!
//! Platform runtime, GPU device, input and timing, plus the two per-frame
//! batches (rounded quads, immediate lines/triangles) and their renderers.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod batch;
pub mod render;
pub mod paint;
