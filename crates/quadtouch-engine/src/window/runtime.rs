use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use crate::coords::ScreenSize;
use crate::core::{App as CoreApp, AppControl, FrameCtx, SetupCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::{FrameClock, FrameTime};

/// How the window is sized at creation.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowMode {
    /// Fixed logical size.
    Windowed(LogicalSize<f64>),
    /// Sized to the primary display's resolution.
    ///
    /// Falls back to [`ScreenSize::FALLBACK`] when no display can be queried.
    DisplaySize,
    /// Borderless fullscreen on the current display.
    Fullscreen,
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub mode: WindowMode,

    /// Drive a virtual finger with the left mouse button.
    pub emulate_touch: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "quadtouch".to_string(),
            mode: WindowMode::DisplaySize,
            emulate_touch: !cfg!(target_os = "android"),
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }
}

enum Command {
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Creates a default event loop and runs `app` until it exits.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        Self::run_with(event_loop, config, gpu_init, app)
    }

    /// Runs `app` on a caller-built event loop (e.g. one bound to an Android activity).
    ///
    /// Returns an error when startup was aborted (window, GPU or app setup failed).
    pub fn run_with<A>(
        event_loop: EventLoop<()>,
        config: RuntimeConfig,
        gpu_init: GpuInit,
        app: A,
    ) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.startup_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Picks the display resolution, or the fallback size when none is known.
pub fn resolve_display_size(reported: Option<PhysicalSize<u32>>) -> ScreenSize {
    match reported.map(ScreenSize::from) {
        Some(size) if !size.is_empty() => size,
        _ => {
            log::warn!(
                "display size unavailable; using {}x{}",
                ScreenSize::FALLBACK.width,
                ScreenSize::FALLBACK.height
            );
            ScreenSize::FALLBACK
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    // One window; dropped while the app is suspended (Android tears the surface down).
    window: Option<(WindowId, WindowEntry)>,
    exit_requested: bool,
    startup_error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            exit_requested: false,
            startup_error: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    /// Reported to the caller of `Runtime::run`, which logs it.
    fn abort_startup(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.window = None;
        self.startup_error = Some(err);
        self.request_exit(event_loop);
    }

    fn window_attributes(&self, event_loop: &ActiveEventLoop) -> winit::window::WindowAttributes {
        let attrs = Window::default_attributes().with_title(self.config.title.clone());

        match &self.config.mode {
            WindowMode::Windowed(size) => attrs.with_inner_size(*size),
            WindowMode::DisplaySize => {
                let display = event_loop.primary_monitor().map(|m| m.size());
                let size = resolve_display_size(display);
                log::info!("display: {}x{}", size.width, size.height);
                attrs.with_inner_size(PhysicalSize::new(size.width, size.height))
            }
            WindowMode::Fullscreen => attrs.with_fullscreen(Some(Fullscreen::Borderless(None))),
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = self.window_attributes(event_loop);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()?;

        let app = &mut self.app;
        entry
            .with(|fields| {
                let mut ctx = SetupCtx {
                    window: WindowCtx {
                        id,
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                };
                app.on_setup(&mut ctx)
            })
            .context("application setup failed")?;

        entry.with_window(|w| w.request_redraw());
        self.window = Some((id, entry));
        Ok(())
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::Exit => self.request_exit(event_loop),
            }
        }
    }

    fn draw_frame(&mut self, event_loop: &ActiveEventLoop) {
        let mut runtime_ctx = RuntimeCtx::default();
        let mut app_control = AppControl::Continue;

        let Some((window_id, entry)) = self.window.as_mut() else {
            return;
        };
        let window_id = *window_id;
        let app = &mut self.app;

        entry.with_mut(|fields| {
            let ft: FrameTime = fields.clock.tick();

            // Scope to ensure `ctx` is dropped before mutating frame state.
            {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id: window_id,
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                    input_frame: fields.input_frame,
                    time: ft,
                    runtime: &mut runtime_ctx,
                };

                app_control = app.on_frame(&mut ctx);
            }

            // Events are consumed once per frame.
            fields.input_frame.clear();
        });

        if app_control == AppControl::Exit {
            runtime_ctx.exit();
        }

        self.apply_commands(event_loop, runtime_ctx);
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        log::info!("resumed; creating window");
        if let Err(e) = self.create_window_entry(event_loop) {
            self.abort_startup(event_loop, e);
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // The native window is about to go away; the surface must not outlive it.
        if self.window.take().is_some() {
            log::info!("suspended; window and GPU surface released");
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the rotation animation advances once per frame.
        if let Some((_, entry)) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let emulate_touch = self.config.emulate_touch;
        let app = &mut self.app;

        let Some((id, entry)) = self.window.as_mut() else {
            return;
        };
        if *id != window_id {
            return;
        }

        let mut exit_from_app_event = false;

        entry.with_mut(|fields| {
            if let Some(ev) =
                translate_window_event(fields.window, fields.input_state, &event, emulate_touch)
            {
                fields.input_state.apply_event(fields.input_frame, ev);
            }

            if app.on_window_event(window_id, &event) == AppControl::Exit {
                exit_from_app_event = true;
            }
        });

        if exit_from_app_event {
            self.request_exit(event_loop);
            return;
        }

        // Runtime-managed window lifecycle / resize / redraw handling.
        match &event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.window = None;
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some((_, entry)) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some((_, entry)) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => self.draw_frame(event_loop),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reported_display_size_is_used() {
        let size = resolve_display_size(Some(PhysicalSize::new(1080, 2400)));
        assert_eq!(size, ScreenSize::new(1080, 2400));
    }

    #[test]
    fn missing_or_empty_display_falls_back() {
        assert_eq!(resolve_display_size(None), ScreenSize::FALLBACK);
        assert_eq!(resolve_display_size(Some(PhysicalSize::new(0, 0))), ScreenSize::FALLBACK);
    }

    #[test]
    fn default_config_sizes_to_display() {
        let config = RuntimeConfig::default();
        assert_eq!(config.mode, WindowMode::DisplaySize);
        assert_eq!(config.title, "quadtouch");
    }
}
