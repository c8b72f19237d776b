use crate::coords::Vec2;

/// Platform finger identifier.
///
/// Stable for the lifetime of one touch (down → up). Values are opaque.
pub type FingerId = u64;

/// Finger id reserved for the emulated touch driven by the left mouse button.
pub const MOUSE_FINGER: FingerId = u64::MAX;

/// Finger position in normalized touch space (`0..1`, origin top-left).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchPoint {
    pub finger: FingerId,
    pub pos: Vec2,
}

/// Finger movement in normalized touch space.
///
/// `delta` is the movement since the previous event of the same finger.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchMotion {
    pub finger: FingerId,
    pub pos: Vec2,
    pub delta: Vec2,
}

/// Platform-agnostic input events emitted by the runtime.
///
/// Runtime translates window system events into these.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    FingerDown(TouchPoint),
    FingerMotion(TouchMotion),
    FingerUp(TouchPoint),

    /// Hover movement of a mouse pointer with no button held.
    PointerMoved(Vec2),

    /// The user asked to leave (window close, Escape, Android back).
    Quit,
}

impl InputEvent {
    #[inline]
    pub fn is_quit(&self) -> bool {
        matches!(self, InputEvent::Quit)
    }
}
