//! Coordinate and geometry types shared by input, gestures and rendering.
//!
//! Touch space:
//! - normalized `0..1` on both axes
//! - origin top-left, +X right, +Y down
//!
//! Model space is clip space before aspect correction: origin at the center,
//! +Y up. The quad shader converts between the two.

mod screen;
mod vec2;

pub use screen::ScreenSize;
pub use vec2::Vec2;
