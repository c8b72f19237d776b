pub mod app;
pub mod config;

use anyhow::Result;

use quadtouch_engine::window::Runtime;

pub use app::QuadApp;
pub use config::DemoConfig;

/// Runs the demo on the default event loop until it quits.
pub fn run(config: DemoConfig) -> Result<()> {
    let gpu_init = config.gpu_init();
    let app = QuadApp::new(config.gesture.clone());
    Runtime::run(config.runtime, gpu_init, app)
}

#[cfg(target_os = "android")]
#[unsafe(no_mangle)]
fn android_main(activity: winit::platform::android::activity::AndroidApp) {
    use winit::event_loop::EventLoop;
    use winit::platform::android::EventLoopBuilderExtAndroid;

    let config = DemoConfig::from_env();
    quadtouch_engine::logging::init_logging(config.logging());
    config.report_warnings();

    let event_loop = match EventLoop::builder().with_android_app(activity).build() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("failed to create event loop: {err}");
            return;
        }
    };

    let gpu_init = config.gpu_init();
    let app = QuadApp::new(config.gesture.clone());
    if let Err(err) = Runtime::run_with(event_loop, config.runtime, gpu_init, app) {
        log::error!("{err:#}");
    }
}
