//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into `InputEvent`s through
//! `platform::translate_window_event`.

mod frame;
pub(crate) mod platform;
mod snapshot;
mod state;
mod types;

pub use frame::InputFrame;
pub use snapshot::{InputSnapshot, KeyInteraction};
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
