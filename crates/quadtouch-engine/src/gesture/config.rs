use std::f32::consts::FRAC_PI_2;

/// Tuning constants for the gesture interpreter.
///
/// All distances are in normalized touch space (`0..1`).
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Multiplier applied to finger motion while panning.
    pub pan_gain: f32,

    /// A finger going down at or above this height (`y <= hold_max_y`) starts a drag-hold.
    pub hold_max_y: f32,

    /// How far the release may stray from the anchor on the cross axis.
    pub swipe_tolerance: f32,

    /// Minimum travel along the swipe axis for a swipe to count.
    pub swipe_dead_zone: f32,

    /// Scale change applied by one vertical swipe.
    pub scale_step: f32,

    /// Rotation steps queued by one horizontal swipe (one quarter turn).
    pub steps_per_quarter_turn: i32,
}

impl GestureConfig {
    /// Angle covered by a single rotation step, in radians.
    #[inline]
    pub fn rotation_quantum(&self) -> f32 {
        FRAC_PI_2 / self.steps_per_quarter_turn.max(1) as f32
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pan_gain: 1.5,
            hold_max_y: 0.5,
            swipe_tolerance: 0.2,
            swipe_dead_zone: 0.1,
            scale_step: 0.2,
            steps_per_quarter_turn: 10,
        }
    }
}
