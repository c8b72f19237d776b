use quadtouch_demo::DemoConfig;
use quadtouch_engine::logging::init_logging;

fn main() {
    let config = DemoConfig::from_env();
    init_logging(config.logging());
    config.report_warnings();

    // Startup failures end the process normally after being logged.
    if let Err(err) = quadtouch_demo::run(config) {
        log::error!("{err:#}");
    }
}
