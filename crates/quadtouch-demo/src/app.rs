use anyhow::{Context, Result};

use quadtouch_engine::core::{App, AppControl, FrameCtx, SetupCtx};
use quadtouch_engine::gesture::{GestureConfig, GestureControl};
use quadtouch_engine::paint::Color;
use quadtouch_engine::render::QuadRenderer;
use quadtouch_engine::scene::QuadScene;
use quadtouch_engine::time::FpsCounter;

/// The touch demo: one quad, driven by gestures.
///
/// Gesture and rotation state outlive the window so an Android suspend/resume
/// keeps the quad where it was. The renderer is rebuilt per window.
pub struct QuadApp {
    scene: QuadScene,
    renderer: Option<QuadRenderer>,
    fps: FpsCounter,
}

impl QuadApp {
    pub fn new(gesture: GestureConfig) -> Self {
        Self {
            scene: QuadScene::new(gesture),
            renderer: None,
            fps: FpsCounter::new(1.0),
        }
    }
}

impl App for QuadApp {
    fn on_setup(&mut self, ctx: &mut SetupCtx<'_, '_>) -> Result<()> {
        let screen = ctx.window.screen_size();
        log::info!("drawable {}x{}", screen.width, screen.height);

        let renderer = QuadRenderer::new(ctx.gpu.device(), ctx.gpu.surface_format())
            .context("failed to build quad program")?;
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Some(fps) = self.fps.record(ctx.time.dt) {
            log::debug!("{fps:.1} fps");
        }

        if self.scene.feed(&ctx.input_frame.events) == GestureControl::Quit {
            log::info!("quit requested");
            return AppControl::Exit;
        }

        let Some(renderer) = self.renderer.as_ref() else {
            return AppControl::Continue;
        };

        // The rotation step is taken only once a surface frame is in hand.
        let scene = &mut self.scene;
        ctx.render(Color::BLACK, |rctx, target| {
            let transform = scene.step(rctx.screen);
            renderer.render(rctx, target, &transform)
        })
    }
}
