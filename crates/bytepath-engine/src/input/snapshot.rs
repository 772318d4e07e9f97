use super::frame::InputFrame;
use super::state::InputState;
use super::types::Key;

/// Transitions and level of a single key for the current frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct KeyInteraction {
    pub pressed: bool,
    pub released: bool,
    pub held: bool,
}

/// Read-only view over the window input for one frame.
#[derive(Debug, Copy, Clone)]
pub struct InputSnapshot<'a> {
    pub state: &'a InputState,
    pub frame: &'a InputFrame,
}

impl<'a> InputSnapshot<'a> {
    #[inline]
    pub fn new(state: &'a InputState, frame: &'a InputFrame) -> Self {
        Self { state, frame }
    }

    pub fn key(&self, key: Key) -> KeyInteraction {
        KeyInteraction {
            pressed: self.frame.keys_pressed.contains(&key),
            released: self.frame.keys_released.contains(&key),
            held: self.state.key_down(key),
        }
    }

    #[inline]
    pub fn held(&self, key: Key) -> bool {
        self.state.key_down(key)
    }

    /// Whether the window asked to close this frame.
    #[inline]
    pub fn quit_requested(&self) -> bool {
        self.frame.quit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, KeyState};

    #[test]
    fn key_interaction_reflects_frame_and_state() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(
            &mut frame,
            InputEvent::Key {
                key: Key::ArrowRight,
                state: KeyState::Pressed,
                repeat: false,
            },
        );

        let snap = InputSnapshot::new(&state, &frame);
        assert_eq!(
            snap.key(Key::ArrowRight),
            KeyInteraction {
                pressed: true,
                released: false,
                held: true
            }
        );
        assert_eq!(snap.key(Key::ArrowLeft), KeyInteraction::default());
        assert!(!snap.quit_requested());
    }
}
