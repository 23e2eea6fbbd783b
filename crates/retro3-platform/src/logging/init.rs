use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "retro3_host=debug,wgpu=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }
}

/// Where the active log filter came from.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FilterSource {
    Config(String),
    RustLog(String),
    Default,
}

impl FilterSource {
    /// Explicit config wins over `RUST_LOG`, which wins over the `info` default.
    pub fn resolve(config: Option<&str>, rust_log: Option<&str>) -> Self {
        let non_empty = |s: &&str| !s.trim().is_empty();
        if let Some(f) = config.filter(non_empty) {
            FilterSource::Config(f.to_string())
        } else if let Some(f) = rust_log.filter(non_empty) {
            FilterSource::RustLog(f.to_string())
        } else {
            FilterSource::Default
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Idempotent; later calls are ignored. Call early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        let rust_log = std::env::var("RUST_LOG").ok();
        let source = FilterSource::resolve(config.env_filter.as_deref(), rust_log.as_deref());

        match &source {
            FilterSource::Config(f) | FilterSource::RustLog(f) => {
                builder.parse_filters(f);
            }
            FilterSource::Default => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }

        builder.write_style(config.write_style);

        // `try_init` so a logger installed by a test harness is not an error.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized ({source:?})");
    });
}
