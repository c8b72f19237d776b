use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "quadtouch_engine=debug,wgpu=warn").
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Where the active filter came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FilterSource {
    Config(String),
    Env(String),
    Level(log::LevelFilter),
}

/// Explicit config wins over `RUST_LOG`, which wins over the default level.
pub(crate) fn resolve_filter(config: &LoggingConfig, rust_log: Option<String>) -> FilterSource {
    if let Some(filter) = config.env_filter.clone().filter(|f| !f.trim().is_empty()) {
        FilterSource::Config(filter)
    } else if let Some(filter) = rust_log.filter(|f| !f.trim().is_empty()) {
        FilterSource::Env(filter)
    } else {
        FilterSource::Level(config.default_level)
    }
}

impl FilterSource {
    /// Global `log` ceiling; a filter string decides per target below it.
    pub(crate) fn max_level(&self) -> log::LevelFilter {
        match self {
            FilterSource::Config(_) | FilterSource::Env(_) => log::LevelFilter::Trace,
            FilterSource::Level(level) => *level,
        }
    }
}

/// Tag under which records show up in logcat.
#[cfg(target_os = "android")]
const ANDROID_TAG: &str = "quadtouch";

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Desktop logs go to stderr through `env_logger`; Android logs go to logcat.
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main` / `android_main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let source = resolve_filter(&config, std::env::var("RUST_LOG").ok());
        install(&config, source);
        log::debug!("logging initialized");
    });
}

#[cfg(not(target_os = "android"))]
fn install(config: &LoggingConfig, source: FilterSource) {
    let mut builder = env_logger::Builder::new();
    let level = source.max_level();

    match source {
        FilterSource::Config(filter) | FilterSource::Env(filter) => {
            builder.parse_filters(&filter);
        }
        FilterSource::Level(_) => {
            builder.filter_level(level);
        }
    }

    builder.write_style(config.write_style);

    // Another logger may already be installed by a host (tests, embedding app).
    let _ = builder.try_init();
}

#[cfg(target_os = "android")]
fn install(_config: &LoggingConfig, source: FilterSource) {
    let mut android = android_logger::Config::default()
        .with_tag(ANDROID_TAG)
        .with_max_level(source.max_level());

    if let FilterSource::Config(filter) | FilterSource::Env(filter) = &source {
        android = android.with_filter(android_logger::FilterBuilder::new().parse(filter).build());
    }

    // `init_once` keeps an existing logger.
    android_logger::init_once(android);
}
