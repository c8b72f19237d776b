//! quadtouch engine crate.
//!
//! Platform + GPU runtime for the touch-driven quad demo, and the gesture
//! interpreter that turns finger events into the quad's transform.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod gesture;
pub mod render;
pub mod paint;
pub mod scene;
