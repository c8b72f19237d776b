use crate::coords::{ScreenSize, Vec2};

use super::rotation::RotationState;
use super::state::GestureState;

/// Per-frame transform parameters of the quad, as consumed by the shader.
///
/// The vertex shader computes
/// `pos = rotation * (scale * vertex) + offset; pos.y *= ratio`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadTransform {
    /// Model offset in clip space (+Y up).
    pub offset: Vec2,
    pub scale: f32,
    /// Column-major rotation matrix.
    pub rotation: [[f32; 2]; 2],
    /// Screen width over height.
    pub ratio: f32,
}

impl QuadTransform {
    /// Derives the transform from gesture and animation state.
    ///
    /// The pan offset lives in touch space, so its Y is flipped here.
    pub fn new(gesture: &GestureState, rotation: &RotationState, screen: ScreenSize) -> Self {
        Self {
            offset: gesture.offset().flip_y(),
            scale: gesture.scale(),
            rotation: rotation.matrix(),
            ratio: screen.aspect_ratio(),
        }
    }

    /// Applies the transform to a model-space vertex, mirroring the vertex shader.
    pub fn apply(&self, vertex: Vec2) -> Vec2 {
        let v = vertex * self.scale;
        let [c0, c1] = self.rotation;
        let mut out = Vec2::new(c0[0] * v.x + c1[0] * v.y, c0[1] * v.x + c1[1] * v.y) + self.offset;
        out.y *= self.ratio;
        out
    }
}

impl Default for QuadTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::zero(),
            scale: 1.0,
            rotation: [[1.0, 0.0], [0.0, 1.0]],
            ratio: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::rotation_matrix;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5
    }

    #[test]
    fn default_is_identity() {
        let t = QuadTransform::default();
        assert_eq!(t.apply(Vec2::new(0.5, -0.5)), Vec2::new(0.5, -0.5));
    }

    #[test]
    fn pan_down_moves_quad_down() {
        let mut g = GestureState::default();
        g.apply(&crate::input::InputEvent::FingerMotion(crate::input::TouchMotion {
            finger: 0,
            pos: Vec2::new(0.5, 0.9),
            delta: Vec2::new(0.0, 0.2),
        }));
        let t = QuadTransform::new(&g, &RotationState::new(), ScreenSize::new(100, 100));
        assert!(t.offset.y < 0.0);
        assert!(close(t.apply(Vec2::zero()), Vec2::new(0.0, -0.3)));
    }

    #[test]
    fn negative_quarter_turn_is_clockwise() {
        let t = QuadTransform { rotation: rotation_matrix(-FRAC_PI_2), ..QuadTransform::default() };
        assert!(close(t.apply(Vec2::new(0.5, 0.0)), Vec2::new(0.0, -0.5)));
    }

    #[test]
    fn scale_then_offset_then_ratio() {
        let t = QuadTransform {
            offset: Vec2::new(0.25, 0.25),
            scale: 2.0,
            rotation: rotation_matrix(0.0),
            ratio: 0.5,
        };
        assert!(close(t.apply(Vec2::new(0.5, 0.5)), Vec2::new(1.25, 0.625)));
    }

    #[test]
    fn ratio_follows_screen() {
        let t = QuadTransform::new(
            &GestureState::default(),
            &RotationState::new(),
            ScreenSize::new(1080, 2160),
        );
        assert_eq!(t.ratio, 0.5);
    }
}
