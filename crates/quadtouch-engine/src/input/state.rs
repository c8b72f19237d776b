use std::collections::HashMap;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{FingerId, InputEvent, TouchMotion, TouchPoint, MOUSE_FINGER};

/// Current input state for a single window.
///
/// Tracks where each finger currently rests so the platform layer can turn
/// absolute positions into per-motion deltas.
/// Per-frame events are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Mouse pointer position in normalized touch space.
    ///
    /// Follows the emulated finger while the button is held.
    pub pointer_pos: Option<Vec2>,

    /// Last known position of every finger currently down.
    pub fingers: HashMap<FingerId, Vec2>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes it to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::FingerDown(TouchPoint { finger, pos }) => {
                self.fingers.insert(*finger, *pos);
            }

            InputEvent::FingerMotion(TouchMotion { finger, pos, .. }) => {
                self.fingers.insert(*finger, *pos);
                self.follow_mouse(*finger, *pos);
            }

            InputEvent::FingerUp(TouchPoint { finger, pos }) => {
                self.fingers.remove(finger);
                self.follow_mouse(*finger, *pos);
            }

            InputEvent::PointerMoved(pos) => {
                self.pointer_pos = Some(*pos);
            }

            InputEvent::Quit => {}
        }

        frame.push_event(ev);
    }

    fn follow_mouse(&mut self, finger: FingerId, pos: Vec2) {
        if finger == MOUSE_FINGER {
            self.pointer_pos = Some(pos);
        }
    }

    /// Last known position of `finger`, if it is down.
    pub fn finger_pos(&self, finger: FingerId) -> Option<Vec2> {
        self.fingers.get(&finger).copied()
    }

    pub fn finger_down(&self, finger: FingerId) -> bool {
        self.fingers.contains_key(&finger)
    }
}
