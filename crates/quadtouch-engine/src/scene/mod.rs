//! Per-frame scene state.
//!
//! `QuadScene` is the platform-free half of the frame loop: it consumes the
//! frame's input events and yields the transform to draw, so the whole
//! gesture-to-transform path can be driven without a window or GPU.

mod quad;

pub use quad::{FrameStep, QuadScene};
