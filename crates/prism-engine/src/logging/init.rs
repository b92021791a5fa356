use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` filter syntax (e.g. "info",
/// "prism_engine=debug,wgpu_core=warn"). When it is `None`, `RUST_LOG` is used,
/// then `default_level`.
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

/// Filter chosen for the global logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Filter {
    Directives(String),
    Level(log::LevelFilter),
}

pub(super) fn resolve_filter(config: &LoggingConfig, rust_log: Option<String>) -> Filter {
    config
        .env_filter
        .clone()
        .or(rust_log)
        .filter(|f| !f.trim().is_empty())
        .map(Filter::Directives)
        .unwrap_or(Filter::Level(config.default_level))
}

static INIT: Once = Once::new();

/// Installs the global `env_logger` once; later calls are ignored.
///
/// Call early in `main`, before the runtime starts.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match resolve_filter(&config, std::env::var("RUST_LOG").ok()) {
            Filter::Directives(d) => builder.parse_filters(&d),
            Filter::Level(level) => builder.filter_level(level),
        };

        builder.write_style(config.write_style);
        if let Err(e) = builder.try_init() {
            eprintln!("prism: logger already installed: {e}");
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins_over_env() {
        let cfg = LoggingConfig {
            env_filter: Some("prism_engine=trace".into()),
            ..Default::default()
        };
        assert_eq!(
            resolve_filter(&cfg, Some("warn".into())),
            Filter::Directives("prism_engine=trace".into())
        );
    }

    #[test]
    fn env_used_when_no_explicit_filter() {
        let cfg = LoggingConfig::default();
        assert_eq!(
            resolve_filter(&cfg, Some("debug".into())),
            Filter::Directives("debug".into())
        );
    }

    #[test]
    fn falls_back_to_default_level() {
        let cfg = LoggingConfig {
            default_level: log::LevelFilter::Warn,
            ..Default::default()
        };
        assert_eq!(resolve_filter(&cfg, None), Filter::Level(log::LevelFilter::Warn));
        assert_eq!(
            resolve_filter(&cfg, Some("  ".into())),
            Filter::Level(log::LevelFilter::Warn)
        );
    }
}
