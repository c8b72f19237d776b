/// Animated rotation angle of the quad.
///
/// The angle only moves when a pending step is consumed; one step per frame
/// gives a quarter turn over `steps_per_quarter_turn` frames.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RotationState {
    angle: f32,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current angle in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advances by one step of `quantum` radians.
    ///
    /// `sign` comes from [`GestureState::take_rotation_step`](super::GestureState::take_rotation_step):
    /// positive steps turn clockwise on screen (the angle decreases), negative
    /// steps counter-clockwise, `0` leaves the angle untouched.
    pub fn advance(&mut self, sign: i32, quantum: f32) {
        self.angle -= sign as f32 * quantum;
    }

    /// Column-major 2×2 rotation matrix for the current angle.
    pub fn matrix(&self) -> [[f32; 2]; 2] {
        rotation_matrix(self.angle)
    }
}

/// Column-major 2×2 rotation matrix: `[[cos, sin], [-sin, cos]]`.
pub fn rotation_matrix(angle: f32) -> [[f32; 2]; 2] {
    let (sin, cos) = angle.sin_cos();
    [[cos, sin], [-sin, cos]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_at_zero() {
        assert_eq!(rotation_matrix(0.0), [[1.0, 0.0], [-0.0, 1.0]]);
    }

    #[test]
    fn positive_steps_decrease_angle() {
        let mut r = RotationState::new();
        r.advance(1, 0.1);
        assert!((r.angle() + 0.1).abs() < 1e-6);
        r.advance(-1, 0.1);
        r.advance(-1, 0.1);
        assert!((r.angle() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn zero_sign_is_a_no_op() {
        let mut r = RotationState::new();
        r.advance(0, FRAC_PI_2);
        assert_eq!(r.angle(), 0.0);
    }
}
