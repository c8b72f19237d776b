//! Shader compile-and-link helper.
//!
//! wgpu reports shader problems asynchronously through the device error
//! handler, which is too late to abort startup cleanly. Sources are therefore
//! parsed and validated with naga first; a failure comes back as a
//! [`ShaderError`] carrying the compiler diagnostic. Once both stages are
//! valid the pipeline is built; a pipeline (link) failure after that point
//! goes to wgpu's uncaptured-error handler, which panics.

use std::fmt;

use naga::front::wgsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};

/// Programmable stage a diagnostic belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A shader stage failed to compile.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderError {
    pub stage: ShaderStage,
    pub label: String,
    /// Compiler output, with source excerpts.
    pub diagnostic: String,
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not compile {} shader `{}`:\n{}",
            self.stage, self.label, self.diagnostic
        )
    }
}

impl std::error::Error for ShaderError {}

/// Everything needed to build one render pipeline from WGSL sources.
///
/// Both sources must expose their entry point as `main`.
pub struct ProgramDesc<'a> {
    pub label: &'a str,
    pub vertex_source: &'a str,
    pub fragment_source: &'a str,
    pub vertex_buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub topology: wgpu::PrimitiveTopology,
    pub target_format: wgpu::TextureFormat,
}

/// Entry point name expected in both stages.
pub const ENTRY_POINT: &str = "main";

/// Parses and validates one WGSL stage without touching the GPU.
pub fn check_wgsl(stage: ShaderStage, label: &str, source: &str) -> Result<(), ShaderError> {
    let fail = |diagnostic: String| ShaderError {
        stage,
        label: label.to_string(),
        diagnostic,
    };

    let module = wgsl::parse_str(source).map_err(|e| fail(e.emit_to_string(source)))?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| fail(e.emit_to_string(source)))?;

    let wanted = match stage {
        ShaderStage::Vertex => naga::ShaderStage::Vertex,
        ShaderStage::Fragment => naga::ShaderStage::Fragment,
    };
    let has_entry = module
        .entry_points
        .iter()
        .any(|ep| ep.stage == wanted && ep.name == ENTRY_POINT);
    if !has_entry {
        return Err(fail(format!("missing @{stage} entry point `{ENTRY_POINT}`")));
    }

    Ok(())
}

/// Compiles both stages and links them into a render pipeline.
pub fn compile_program(
    device: &wgpu::Device,
    desc: &ProgramDesc<'_>,
) -> Result<wgpu::RenderPipeline, ShaderError> {
    let vs_label = format!("{} vs", desc.label);
    let fs_label = format!("{} fs", desc.label);

    check_wgsl(ShaderStage::Vertex, &vs_label, desc.vertex_source)?;
    check_wgsl(ShaderStage::Fragment, &fs_label, desc.fragment_source)?;

    let vs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&vs_label),
        source: wgpu::ShaderSource::Wgsl(desc.vertex_source.into()),
    });
    let fs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&fs_label),
        source: wgpu::ShaderSource::Wgsl(desc.fragment_source.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: desc.bind_group_layouts,
        immediate_size: 0,
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: &vs,
            entry_point: Some(ENTRY_POINT),
            compilation_options: Default::default(),
            buffers: desc.vertex_buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: &fs,
            entry_point: Some(ENTRY_POINT),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.target_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    log::info!("program `{}` linked", desc.label);

    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FS_OK: &str = "@fragment fn main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";

    #[test]
    fn valid_fragment_passes() {
        assert_eq!(check_wgsl(ShaderStage::Fragment, "ok", FS_OK), Ok(()));
    }

    #[test]
    fn syntax_error_is_reported_with_stage() {
        let err = check_wgsl(ShaderStage::Vertex, "broken", "@vertex fn main( {").unwrap_err();
        assert_eq!(err.stage, ShaderStage::Vertex);
        assert_eq!(err.label, "broken");
        assert!(!err.diagnostic.is_empty());
        assert!(err.to_string().starts_with("could not compile vertex shader `broken`"));
    }

    #[test]
    fn type_error_is_reported() {
        let src = "@fragment fn main() -> @location(0) vec4<f32> { return 1.0; }";
        let err = check_wgsl(ShaderStage::Fragment, "mistyped", src).unwrap_err();
        assert_eq!(err.stage, ShaderStage::Fragment);
    }

    #[test]
    fn wrong_stage_entry_point_is_reported() {
        let err = check_wgsl(ShaderStage::Vertex, "fs-as-vs", FS_OK).unwrap_err();
        assert!(err.diagnostic.contains("entry point"));
    }
}
