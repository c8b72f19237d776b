use crate::coords::ScreenSize;
use crate::gesture::{GestureConfig, GestureControl, GestureState, QuadTransform, RotationState};
use crate::input::InputEvent;

/// Result of advancing the scene by one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FrameStep {
    /// Draw the quad with this transform.
    Draw(QuadTransform),
    /// A quit event arrived; stop without drawing.
    Quit,
}

/// Frame-loop state of the quad demo: the gesture interpreter plus the
/// rotation animation it drives.
#[derive(Debug, Clone, Default)]
pub struct QuadScene {
    gesture: GestureState,
    rotation: RotationState,
}

impl QuadScene {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            gesture: GestureState::new(config),
            rotation: RotationState::new(),
        }
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn gesture_mut(&mut self) -> &mut GestureState {
        &mut self.gesture
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    /// Runs one frame: feeds this frame's events, then moves the rotation
    /// animation by at most one step.
    ///
    /// A quit anywhere in `events` ends the frame immediately, whatever
    /// rotation or drag-hold is in flight.
    pub fn advance(&mut self, events: &[InputEvent], screen: ScreenSize) -> FrameStep {
        match self.feed(events) {
            GestureControl::Quit => FrameStep::Quit,
            GestureControl::Continue => FrameStep::Draw(self.step(screen)),
        }
    }

    /// Input half of a frame. Leaves the rotation animation alone.
    pub fn feed(&mut self, events: &[InputEvent]) -> GestureControl {
        self.gesture.apply_all(events)
    }

    /// Draw half of a frame: consumes one pending rotation step and returns
    /// the transform to draw with.
    ///
    /// Call only for frames that are actually drawn so every step is shown.
    pub fn step(&mut self, screen: ScreenSize) -> QuadTransform {
        let sign = self.gesture.take_rotation_step();
        if sign != 0 {
            let quantum = self.gesture.config().rotation_quantum();
            self.rotation.advance(sign, quantum);
        }

        let transform = QuadTransform::new(&self.gesture, &self.rotation, screen);
        log::trace!(
            "frame: offset={:?} scale={} angle={} pending={}",
            transform.offset,
            transform.scale,
            self.rotation.angle(),
            self.gesture.rotation_steps()
        );

        transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::input::{TouchMotion, TouchPoint};
    use std::f32::consts::FRAC_PI_2;

    const SCREEN: ScreenSize = ScreenSize::new(1080, 1920);
    const QUANTUM: f32 = FRAC_PI_2 / 10.0;

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::FingerDown(TouchPoint { finger: 0, pos: Vec2::new(x, y) })
    }

    fn up(x: f32, y: f32) -> InputEvent {
        InputEvent::FingerUp(TouchPoint { finger: 0, pos: Vec2::new(x, y) })
    }

    fn motion(dx: f32, dy: f32) -> InputEvent {
        InputEvent::FingerMotion(TouchMotion {
            finger: 0,
            pos: Vec2::new(0.5, 0.75),
            delta: Vec2::new(dx, dy),
        })
    }

    fn draw(step: FrameStep) -> QuadTransform {
        match step {
            FrameStep::Draw(t) => t,
            FrameStep::Quit => panic!("unexpected quit"),
        }
    }

    // ── rotation animation ────────────────────────────────────────────────

    #[test]
    fn thirty_steps_take_thirty_frames() {
        let mut scene = QuadScene::default();
        scene.gesture_mut().queue_rotation(30);

        let mut prev = scene.rotation().angle();
        for frame in 1..=30 {
            scene.advance(&[], SCREEN);
            let angle = scene.rotation().angle();
            assert!(angle < prev, "frame {frame}: angle did not decrease");
            assert!((prev - angle - QUANTUM).abs() < 1e-5);
            prev = angle;
        }

        assert_eq!(scene.gesture().rotation_steps(), 0);
        assert!((scene.rotation().angle() + 3.0 * FRAC_PI_2).abs() < 1e-4);

        scene.advance(&[], SCREEN);
        assert_eq!(scene.rotation().angle(), prev);
    }

    #[test]
    fn swipe_left_turns_counter_clockwise_over_ten_frames() {
        let mut scene = QuadScene::default();
        scene.advance(&[down(0.8, 0.2), up(0.3, 0.2)], SCREEN);
        assert_eq!(scene.gesture().rotation_steps(), -9);

        for _ in 0..9 {
            scene.advance(&[], SCREEN);
        }
        assert_eq!(scene.gesture().rotation_steps(), 0);
        assert!((scene.rotation().angle() - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn skipped_frames_keep_their_rotation_step() {
        let mut scene = QuadScene::default();
        scene.gesture_mut().queue_rotation(10);

        // Frames whose surface could not be acquired only feed input.
        for _ in 0..3 {
            assert_eq!(scene.feed(&[]), GestureControl::Continue);
        }
        assert_eq!(scene.gesture().rotation_steps(), 10);
        assert_eq!(scene.rotation().angle(), 0.0);

        for _ in 0..10 {
            scene.step(SCREEN);
        }
        assert_eq!(scene.gesture().rotation_steps(), 0);
        assert!((scene.rotation().angle() + FRAC_PI_2).abs() < 1e-5);
    }

    // ── pan / scale ───────────────────────────────────────────────────────

    #[test]
    fn pan_reaches_shader_with_flipped_y() {
        let mut scene = QuadScene::default();
        let t = draw(scene.advance(&[motion(0.1, 0.1)], SCREEN));
        assert!((t.offset.x - 0.15).abs() < 1e-6);
        assert!((t.offset.y + 0.15).abs() < 1e-6);
        assert_eq!(t.ratio, SCREEN.aspect_ratio());
    }

    #[test]
    fn vertical_swipe_reaches_shader_scale() {
        let mut scene = QuadScene::default();
        let t = draw(scene.advance(&[down(0.5, 0.45), up(0.5, 0.1)], SCREEN));
        assert!((t.scale - 1.2).abs() < 1e-6);
    }

    // ── quit ──────────────────────────────────────────────────────────────

    #[test]
    fn quit_ends_frame_mid_rotation() {
        let mut scene = QuadScene::default();
        scene.gesture_mut().queue_rotation(10);
        scene.advance(&[], SCREEN);
        let angle = scene.rotation().angle();

        let step = scene.advance(&[InputEvent::Quit], SCREEN);
        assert_eq!(step, FrameStep::Quit);
        assert_eq!(scene.rotation().angle(), angle);
        assert_eq!(scene.gesture().rotation_steps(), 9);
    }

    #[test]
    fn quit_ends_frame_mid_drag() {
        let mut scene = QuadScene::default();
        let step = scene.advance(&[down(0.3, 0.3), InputEvent::Quit, up(0.8, 0.3)], SCREEN);
        assert_eq!(step, FrameStep::Quit);
        assert!(scene.gesture().is_holding());
    }
}
