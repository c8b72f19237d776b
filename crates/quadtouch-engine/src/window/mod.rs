//! Window + runtime loop.
//!
//! Owns the `winit` event loop and window, and wires them to the GPU layer.

mod runtime;

pub use runtime::{resolve_display_size, Runtime, RuntimeConfig, RuntimeCtx, WindowMode};
