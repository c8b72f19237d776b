use crate::coords::Vec2;
use crate::input::{InputEvent, TouchMotion, TouchPoint};

use super::config::GestureConfig;
use super::swipe::{classify_swipe, SwipeOutcome};

/// Directive returned after feeding events to the interpreter.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GestureControl {
    Continue,
    Quit,
}

/// Accumulates touch events into quad transform parameters.
///
/// - a finger going down in the upper half starts a drag-hold and records the anchor
/// - motion outside a drag-hold pans the quad
/// - releasing a drag-hold is classified as a swipe (see [`classify_swipe`])
///
/// Every finger feeds the same state; the interpreter does not track ids.
/// Scale and offset are not clamped.
#[derive(Debug, Clone)]
pub struct GestureState {
    config: GestureConfig,

    anchor: Vec2,
    finger_is_down: bool,

    offset: Vec2,
    scale: f32,
    rotation_steps: i32,
}

impl GestureState {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            anchor: Vec2::zero(),
            finger_is_down: false,
            offset: Vec2::zero(),
            scale: 1.0,
            rotation_steps: 0,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Cumulative pan in touch space (+Y down).
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Signed number of rotation steps still to be animated.
    pub fn rotation_steps(&self) -> i32 {
        self.rotation_steps
    }

    /// Whether a drag-hold is in progress.
    pub fn is_holding(&self) -> bool {
        self.finger_is_down
    }

    /// Adds steps to the pending rotation, as a horizontal swipe would.
    pub fn queue_rotation(&mut self, steps: i32) {
        self.rotation_steps += steps;
    }

    /// Feeds one event.
    pub fn apply(&mut self, ev: &InputEvent) -> GestureControl {
        match ev {
            InputEvent::FingerDown(TouchPoint { pos, .. }) => {
                if pos.y <= self.config.hold_max_y {
                    self.anchor = *pos;
                    self.finger_is_down = true;
                }
            }

            InputEvent::FingerMotion(TouchMotion { delta, .. }) => {
                if !self.finger_is_down {
                    self.offset += *delta * self.config.pan_gain;
                }
            }

            InputEvent::FingerUp(TouchPoint { pos, .. }) => {
                if self.finger_is_down {
                    let outcome = classify_swipe(self.anchor, *pos, &self.config);
                    self.apply_swipe(outcome);
                    self.finger_is_down = false;
                }
            }

            InputEvent::Quit => return GestureControl::Quit,

            InputEvent::PointerMoved(_) => {}
        }

        GestureControl::Continue
    }

    /// Feeds events in order, stopping at the first quit.
    pub fn apply_all<'e, I>(&mut self, events: I) -> GestureControl
    where
        I: IntoIterator<Item = &'e InputEvent>,
    {
        for ev in events {
            if self.apply(ev) == GestureControl::Quit {
                return GestureControl::Quit;
            }
        }
        GestureControl::Continue
    }

    /// Consumes one pending rotation step.
    ///
    /// Returns the sign of the step taken (`1`, `-1`) or `0` when nothing is pending.
    pub fn take_rotation_step(&mut self) -> i32 {
        let sign = self.rotation_steps.signum();
        self.rotation_steps -= sign;
        sign
    }

    fn apply_swipe(&mut self, outcome: SwipeOutcome) {
        if outcome.is_none() {
            log::debug!("gesture: release ignored (anchor {:?})", self.anchor);
            return;
        }

        self.rotation_steps += outcome.rotation_steps;
        self.scale += outcome.scale_delta;

        log::debug!(
            "gesture: swipe -> rotation_steps={} scale={}",
            self.rotation_steps,
            self.scale
        );
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
