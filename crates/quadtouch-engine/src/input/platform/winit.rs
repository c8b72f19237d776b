use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::keyboard::{Key, NamedKey};
use winit::window::Window;

use crate::coords::Vec2;
use crate::input::{FingerId, InputEvent, InputState, TouchMotion, TouchPoint, MOUSE_FINGER};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// When `emulate_touch` is set, the left mouse button drives a virtual finger
/// ([`MOUSE_FINGER`]) so gestures can be exercised on desktop.
///
/// Returns `None` for events not represented by the input subsystem.
pub fn translate_window_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
    emulate_touch: bool,
) -> Option<InputEvent> {
    let size = window.inner_size();

    match event {
        WindowEvent::CloseRequested => Some(InputEvent::Quit),

        WindowEvent::Touch(touch) => Some(translate_touch(
            state,
            touch.id,
            touch.phase,
            touch.location,
            size,
        )),

        WindowEvent::KeyboardInput { event, .. }
            if event.state == ElementState::Pressed && is_quit_key(&event.logical_key) =>
        {
            Some(InputEvent::Quit)
        }

        WindowEvent::CursorMoved { position, .. } if emulate_touch => {
            Some(translate_cursor(state, normalize(*position, size)))
        }

        WindowEvent::MouseInput {
            state: st,
            button: MouseButton::Left,
            ..
        } if emulate_touch => translate_mouse_button(state, *st),

        _ => None,
    }
}

/// Maps a physical position to normalized touch space.
///
/// A zero-sized window is treated as 1×1 so the result stays finite.
pub fn normalize(pos: PhysicalPosition<f64>, size: PhysicalSize<u32>) -> Vec2 {
    let w = size.width.max(1) as f64;
    let h = size.height.max(1) as f64;
    Vec2::new((pos.x / w) as f32, (pos.y / h) as f32)
}

/// Translates one touch sample.
///
/// `Moved` deltas are taken against the finger's last tracked position; a
/// move for an untracked finger reports a zero delta. `Cancelled` ends the
/// touch like `Ended`.
pub fn translate_touch(
    state: &InputState,
    finger: FingerId,
    phase: TouchPhase,
    location: PhysicalPosition<f64>,
    size: PhysicalSize<u32>,
) -> InputEvent {
    let pos = normalize(location, size);

    match phase {
        TouchPhase::Started => InputEvent::FingerDown(TouchPoint { finger, pos }),
        TouchPhase::Moved => {
            let prev = state.finger_pos(finger).unwrap_or(pos);
            InputEvent::FingerMotion(TouchMotion {
                finger,
                pos,
                delta: pos - prev,
            })
        }
        TouchPhase::Ended | TouchPhase::Cancelled => InputEvent::FingerUp(TouchPoint { finger, pos }),
    }
}

fn translate_cursor(state: &InputState, pos: Vec2) -> InputEvent {
    match state.finger_pos(MOUSE_FINGER) {
        Some(prev) => InputEvent::FingerMotion(TouchMotion {
            finger: MOUSE_FINGER,
            pos,
            delta: pos - prev,
        }),
        None => InputEvent::PointerMoved(pos),
    }
}

fn translate_mouse_button(state: &InputState, st: ElementState) -> Option<InputEvent> {
    match st {
        ElementState::Pressed => {
            // winit 0.30 has no cursor query; a press before any move has no position.
            let pos = state.pointer_pos?;
            Some(InputEvent::FingerDown(TouchPoint { finger: MOUSE_FINGER, pos }))
        }
        ElementState::Released => {
            let pos = state.finger_pos(MOUSE_FINGER)?;
            Some(InputEvent::FingerUp(TouchPoint { finger: MOUSE_FINGER, pos }))
        }
    }
}

fn is_quit_key(key: &Key) -> bool {
    matches!(
        key,
        Key::Named(NamedKey::Escape | NamedKey::BrowserBack | NamedKey::GoBack)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputFrame;

    const SIZE: PhysicalSize<u32> = PhysicalSize::new(1000, 2000);

    fn at(x: f64, y: f64) -> PhysicalPosition<f64> {
        PhysicalPosition::new(x, y)
    }

    // ── normalize ─────────────────────────────────────────────────────────

    #[test]
    fn normalize_divides_by_window_size() {
        assert_eq!(normalize(at(250.0, 1500.0), SIZE), Vec2::new(0.25, 0.75));
    }

    #[test]
    fn normalize_zero_size_stays_finite() {
        let v = normalize(at(10.0, 10.0), PhysicalSize::new(0, 0));
        assert!(v.is_finite());
    }

    // ── touch ─────────────────────────────────────────────────────────────

    #[test]
    fn touch_started_is_finger_down() {
        let state = InputState::default();
        let ev = translate_touch(&state, 7, TouchPhase::Started, at(500.0, 500.0), SIZE);
        assert_eq!(
            ev,
            InputEvent::FingerDown(TouchPoint { finger: 7, pos: Vec2::new(0.5, 0.25) })
        );
    }

    #[test]
    fn touch_moved_reports_delta_from_last_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        let down = translate_touch(&state, 1, TouchPhase::Started, at(100.0, 200.0), SIZE);
        state.apply_event(&mut frame, down);

        let ev = translate_touch(&state, 1, TouchPhase::Moved, at(200.0, 200.0), SIZE);
        let InputEvent::FingerMotion(m) = ev else {
            panic!("expected motion, got {ev:?}");
        };
        assert_eq!(m.pos, Vec2::new(0.2, 0.1));
        assert!((m.delta.x - 0.1).abs() < 1e-6);
        assert_eq!(m.delta.y, 0.0);
    }

    #[test]
    fn touch_moved_for_unknown_finger_has_zero_delta() {
        let state = InputState::default();
        let ev = translate_touch(&state, 9, TouchPhase::Moved, at(300.0, 300.0), SIZE);
        let InputEvent::FingerMotion(m) = ev else {
            panic!("expected motion, got {ev:?}");
        };
        assert_eq!(m.delta, Vec2::zero());
    }

    #[test]
    fn touch_cancelled_is_finger_up() {
        let state = InputState::default();
        let ev = translate_touch(&state, 2, TouchPhase::Cancelled, at(0.0, 0.0), SIZE);
        assert!(matches!(ev, InputEvent::FingerUp(TouchPoint { finger: 2, .. })));
    }

    // ── mouse emulation ───────────────────────────────────────────────────

    #[test]
    fn mouse_press_without_known_position_is_ignored() {
        let state = InputState::default();
        assert_eq!(translate_mouse_button(&state, ElementState::Pressed), None);
    }

    #[test]
    fn mouse_drag_behaves_like_a_finger() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        let hover = translate_cursor(&state, Vec2::new(0.5, 0.2));
        assert_eq!(hover, InputEvent::PointerMoved(Vec2::new(0.5, 0.2)));
        state.apply_event(&mut frame, hover);

        let down = translate_mouse_button(&state, ElementState::Pressed).unwrap();
        assert_eq!(
            down,
            InputEvent::FingerDown(TouchPoint { finger: MOUSE_FINGER, pos: Vec2::new(0.5, 0.2) })
        );
        state.apply_event(&mut frame, down);

        let drag = translate_cursor(&state, Vec2::new(0.75, 0.2));
        assert_eq!(
            drag,
            InputEvent::FingerMotion(TouchMotion {
                finger: MOUSE_FINGER,
                pos: Vec2::new(0.75, 0.2),
                delta: Vec2::new(0.25, 0.0),
            })
        );
        state.apply_event(&mut frame, drag);

        let up = translate_mouse_button(&state, ElementState::Released).unwrap();
        assert_eq!(
            up,
            InputEvent::FingerUp(TouchPoint { finger: MOUSE_FINGER, pos: Vec2::new(0.75, 0.2) })
        );
    }

    #[test]
    fn second_click_anchors_where_the_last_drag_ended() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        let hover = translate_cursor(&state, Vec2::new(0.2, 0.2));
        state.apply_event(&mut frame, hover);
        let down = translate_mouse_button(&state, ElementState::Pressed).unwrap();
        state.apply_event(&mut frame, down);
        let drag = translate_cursor(&state, Vec2::new(0.8, 0.2));
        state.apply_event(&mut frame, drag);
        let up = translate_mouse_button(&state, ElementState::Released).unwrap();
        state.apply_event(&mut frame, up);

        let again = translate_mouse_button(&state, ElementState::Pressed).unwrap();
        assert_eq!(
            again,
            InputEvent::FingerDown(TouchPoint { finger: MOUSE_FINGER, pos: Vec2::new(0.8, 0.2) })
        );
    }

    #[test]
    fn mouse_release_without_press_is_ignored() {
        let state = InputState::default();
        assert_eq!(translate_mouse_button(&state, ElementState::Released), None);
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn escape_and_back_quit() {
        assert!(is_quit_key(&Key::Named(NamedKey::Escape)));
        assert!(is_quit_key(&Key::Named(NamedKey::BrowserBack)));
        assert!(!is_quit_key(&Key::Named(NamedKey::Enter)));
    }
}
