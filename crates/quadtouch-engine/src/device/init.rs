/// Initialization parameters for the GPU layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends the instance may pick from.
    ///
    /// Android defaults to GL so the demo runs on a plain GLES 3.0 context.
    pub backends: wgpu::Backends,

    /// Prefer an sRGB surface format when available.
    ///
    /// Colors authored for a raw GLES framebuffer look washed out through an
    /// sRGB target; such content should disable this.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// Falls back to FIFO when the surface does not support the requested mode.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    ///
    /// Defaults to the WebGL2/GLES3 downlevel set, which every backend satisfies.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    /// Backends used when nothing else is requested.
    pub fn default_backends() -> wgpu::Backends {
        if cfg!(target_os = "android") {
            wgpu::Backends::GL
        } else {
            wgpu::Backends::all()
        }
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: Self::default_backends(),
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}
