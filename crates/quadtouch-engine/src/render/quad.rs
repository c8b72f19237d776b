use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::gesture::QuadTransform;
use crate::render::program::{compile_program, ProgramDesc, ShaderError};
use crate::render::{RenderCtx, RenderTarget};

pub const QUAD_VS: &str = include_str!("shaders/quad_vs.wgsl");
pub const QUAD_FS: &str = include_str!("shaders/quad_fs.wgsl");

/// Interleaved position + color vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 2],
    pub color: [f32; 3],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x3  // color
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// The quad, corners listed counter-clockwise from bottom-left.
pub const QUAD_CORNERS: [QuadVertex; 4] = [
    QuadVertex { pos: [-0.5, -0.5], color: [0.9725, 0.0470, 0.0706] },
    QuadVertex { pos: [0.5, -0.5], color: [0.9960, 0.6823, 0.1764] },
    QuadVertex { pos: [0.5, 0.5], color: [0.4117, 0.8156, 0.1450] },
    QuadVertex { pos: [-0.5, 0.5], color: [0.2000, 0.0666, 0.7333] },
];

/// Corners in strip order (0, 1, 3, 2).
///
/// wgpu has no triangle fans; this strip covers the same two triangles as
/// the fan 0-1-2-3 without an index buffer.
pub fn strip_vertices() -> [QuadVertex; 4] {
    let [a, b, c, d] = QUAD_CORNERS;
    [a, b, d, c]
}

/// Uniform block of the quad vertex shader.
///
/// Layout matches WGSL `Model`: `mat2x2<f32>` is 8-byte aligned, so it lands
/// at offset 16 right after the two scalars.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ModelUniform {
    pub offset: [f32; 2],
    pub scale: f32,
    pub ratio: f32,
    pub rotation: [[f32; 2]; 2],
}

impl From<&QuadTransform> for ModelUniform {
    fn from(t: &QuadTransform) -> Self {
        Self {
            offset: t.offset.to_array(),
            scale: t.scale,
            ratio: t.ratio,
            rotation: t.rotation,
        }
    }
}

/// Draws the single colored quad.
///
/// All GPU resources are created up front by [`QuadRenderer::new`], so a
/// broken shader surfaces during setup rather than on the first frame.
pub struct QuadRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    model_ubo: wgpu::Buffer,
    vbo: wgpu::Buffer,
    format: wgpu::TextureFormat,
}

impl QuadRenderer {
    /// Compiles the quad program and uploads the static vertex buffer.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self, ShaderError> {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("quadtouch quad bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ModelUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline = compile_program(
            device,
            &ProgramDesc {
                label: "quadtouch quad",
                vertex_source: QUAD_VS,
                fragment_source: QUAD_FS,
                vertex_buffers: &[QuadVertex::layout()],
                bind_group_layouts: &[&bind_group_layout],
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                target_format: format,
            },
        )?;

        let model_ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quadtouch quad model ubo"),
            contents: bytemuck::bytes_of(&ModelUniform::from(&QuadTransform::default())),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quadtouch quad bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_ubo.as_entire_binding(),
            }],
        });

        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quadtouch quad vbo"),
            contents: bytemuck::cast_slice(&strip_vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self {
            pipeline,
            bind_group,
            model_ubo,
            vbo,
            format,
        })
    }

    /// Uploads `transform` and records the draw into `target`.
    ///
    /// The caller is expected to have cleared the target already.
    pub fn render(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, transform: &QuadTransform) {
        if ctx.surface_format != self.format {
            log::warn!(
                "quad pipeline built for {:?}, surface is {:?}; skipping draw",
                self.format,
                ctx.surface_format
            );
            return;
        }

        let uniform = ModelUniform::from(transform);
        ctx.queue.write_buffer(&self.model_ubo, 0, bytemuck::bytes_of(&uniform));

        let mut rpass = target.begin_pass("quadtouch quad pass", wgpu::LoadOp::Load);
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.draw(0..4, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::gesture::rotation_matrix;

    #[test]
    fn uniform_is_32_bytes() {
        assert_eq!(std::mem::size_of::<ModelUniform>(), 32);
        assert_eq!(std::mem::offset_of!(ModelUniform, rotation), 16);
    }

    #[test]
    fn vertex_is_interleaved_five_floats() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 5 * 4);
    }

    #[test]
    fn strip_order_swaps_last_two_corners() {
        let s = strip_vertices();
        assert_eq!(s[0], QUAD_CORNERS[0]);
        assert_eq!(s[1], QUAD_CORNERS[1]);
        assert_eq!(s[2], QUAD_CORNERS[3]);
        assert_eq!(s[3], QUAD_CORNERS[2]);
    }

    #[test]
    fn uniform_copies_transform() {
        let t = QuadTransform {
            offset: Vec2::new(0.1, -0.2),
            scale: 1.4,
            rotation: rotation_matrix(0.0),
            ratio: 0.5,
        };
        let u = ModelUniform::from(&t);
        assert_eq!(u.offset, [0.1, -0.2]);
        assert_eq!(u.scale, 1.4);
        assert_eq!(u.ratio, 0.5);
        assert_eq!(u.rotation, t.rotation);
    }
}
