use crate::coords::Vec2;

use super::config::GestureConfig;

/// Effect of one completed drag-hold.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SwipeOutcome {
    /// Signed rotation steps to queue.
    pub rotation_steps: i32,
    /// Change to apply to the model scale.
    pub scale_delta: f32,
}

impl SwipeOutcome {
    #[inline]
    pub fn is_none(&self) -> bool {
        self.rotation_steps == 0 && self.scale_delta == 0.0
    }
}

/// `a` lies in `[b - tolerance, b + tolerance]`.
#[inline]
pub fn within(a: f32, b: f32, tolerance: f32) -> bool {
    a >= b - tolerance && a <= b + tolerance
}

/// Classifies a release against its anchor.
///
/// The horizontal and vertical checks are independent: a short diagonal
/// release that stays inside both tolerance bands triggers both a rotation
/// and a scale change.
pub fn classify_swipe(anchor: Vec2, release: Vec2, config: &GestureConfig) -> SwipeOutcome {
    let mut out = SwipeOutcome::default();
    let dead = config.swipe_dead_zone;

    if within(release.y, anchor.y, config.swipe_tolerance) {
        if release.x > anchor.x + dead {
            out.rotation_steps += config.steps_per_quarter_turn;
        } else if release.x < anchor.x - dead {
            out.rotation_steps -= config.steps_per_quarter_turn;
        }
    }

    // Touch space grows downward: dragging down shrinks, dragging up grows.
    if within(release.x, anchor.x, config.swipe_tolerance) {
        if release.y > anchor.y + dead {
            out.scale_delta -= config.scale_step;
        } else if release.y < anchor.y - dead {
            out.scale_delta += config.scale_step;
        }
    }

    out
}
