//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` and one `FramePacer` per window
//! - call `tick()` once per presented frame to obtain `FrameTime`
//! - call `FramePacer::wait()` after presenting to hold the refresh interval

mod frame_clock;
mod pacer;

pub use frame_clock::{FrameClock, FrameTime};
pub use pacer::{FramePacer, FALLBACK_REFRESH_HZ};
