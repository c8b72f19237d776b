//! Paint model shared between the runtime and renderers.
//!
//! Only solid colors exist here; per-vertex colors live with the quad geometry.

pub mod color;

pub use color::Color;
