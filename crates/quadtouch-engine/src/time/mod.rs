//! Time subsystem.
//!
//! Frame timing without coupling to the runtime:
//! - one `FrameClock` per window, `tick()` once per presented frame
//! - `FpsCounter` for periodic frame-rate diagnostics

mod fps;
mod frame_clock;

pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
