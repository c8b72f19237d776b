//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and record into a
//! `RenderTarget` handed out by the frame context.
//!
//! Convention:
//! - vertex positions are in model space (origin center, +Y up)
//! - the vertex shader applies the per-frame `QuadTransform`

mod ctx;
pub mod program;
pub mod quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use program::{compile_program, ProgramDesc, ShaderError, ShaderStage};
pub use quad::QuadRenderer;
