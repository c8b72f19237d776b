use quadtouch_engine::device::GpuInit;
use quadtouch_engine::gesture::GestureConfig;
use quadtouch_engine::logging::LoggingConfig;
use quadtouch_engine::window::RuntimeConfig;

pub const ENV_VSYNC: &str = "QUADTOUCH_VSYNC";
pub const ENV_BACKEND: &str = "QUADTOUCH_BACKEND";
pub const ENV_LOG: &str = "QUADTOUCH_LOG";

/// Everything the demo can be tuned with.
///
/// Built from the environment before the logger exists, so parse problems are
/// collected in `warnings` and reported once logging is up.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub runtime: RuntimeConfig,
    pub gesture: GestureConfig,
    pub vsync: bool,
    pub backends: wgpu::Backends,
    pub log_filter: Option<String>,
    pub warnings: Vec<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            gesture: GestureConfig::default(),
            vsync: true,
            backends: GpuInit::default_backends(),
            log_filter: None,
            warnings: Vec::new(),
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_VSYNC) {
            match parse_switch(&raw) {
                Some(on) => config.vsync = on,
                None => config.warn(ENV_VSYNC, &raw),
            }
        }

        if let Some(raw) = lookup(ENV_BACKEND) {
            match parse_backends(&raw) {
                Some(backends) => config.backends = backends,
                None => config.warn(ENV_BACKEND, &raw),
            }
        }

        config.log_filter = lookup(ENV_LOG)
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());

        config
    }

    fn warn(&mut self, key: &str, raw: &str) {
        self.warnings
            .push(format!("ignoring {key}={raw:?}; keeping the default"));
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit {
            backends: self.backends,
            // Quad colors are raw framebuffer values.
            prefer_srgb: false,
            present_mode: self.present_mode(),
            ..GpuInit::default()
        }
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log_filter.clone(),
            ..LoggingConfig::default()
        }
    }

    /// Logs the warnings gathered while parsing. Call after the logger is up.
    pub fn report_warnings(&self) {
        for warning in &self.warnings {
            log::warn!("{warning}");
        }
    }
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn parse_backends(raw: &str) -> Option<wgpu::Backends> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "gl" | "gles" => Some(wgpu::Backends::GL),
        "vulkan" | "vk" => Some(wgpu::Backends::VULKAN),
        "metal" => Some(wgpu::Backends::METAL),
        "dx12" => Some(wgpu::Backends::DX12),
        "all" => Some(wgpu::Backends::all()),
        _ => None,
    }
}
