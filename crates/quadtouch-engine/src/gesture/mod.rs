//! Touch-gesture interpreter.
//!
//! Turns the per-frame stream of `InputEvent`s into the quad's transform:
//! pan offset, scale, and a queue of discrete rotation steps that the frame
//! loop animates one step per frame.

mod config;
mod rotation;
mod state;
mod swipe;
mod transform;

pub use config::GestureConfig;
pub use rotation::{rotation_matrix, RotationState};
pub use state::{GestureControl, GestureState};
pub use swipe::{classify_swipe, within, SwipeOutcome};
pub use transform::QuadTransform;
