use super::types::InputEvent;

/// Per-frame input deltas.
///
/// `InputState` provides the current state (fingers on the screen, pointer position).
/// `InputFrame` holds the events that arrived since the previous frame, in order.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Set once a quit event has been recorded this frame.
    pub quit_requested: bool,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.quit_requested = false;
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        if ev.is_quit() {
            self.quit_requested = true;
        }
        self.events.push(ev);
    }
}
