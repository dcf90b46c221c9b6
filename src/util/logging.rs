//! Structured logging setup for dotnet-helper
//!
//! Logging goes through the `tracing` ecosystem and is written to stderr, so
//! it never interleaves with the stdout that child processes inherit.
//!
//! Configuration comes from:
//!
//! - `DOTNET_HELPER_LOG_LEVEL` - trace, debug, info, warn, error
//! - `DOTNET_HELPER_LOG_JSON` - `true` for JSON lines
//! - `RUST_LOG` - standard filter directives, applied on top
//!
//! # Example
//!
//! ```no_run
//! use dotnet_helper::util::logging;
//!
//! logging::init_from_env();
//! tracing::info!("dotnet-helper started");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const ENV_LOG_LEVEL: &str = "DOTNET_HELPER_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "DOTNET_HELPER_LOG_JSON";

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g. dotnet_helper::process) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

/// Parses a log level, falling back to INFO on anything unrecognised.
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn build_filter(level: Level) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();
    if env::var("RUST_LOG").is_err() {
        if let Ok(directive) = format!("dotnet_helper={}", level).parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}

pub fn config_from_env() -> LoggingConfig {
    let level_str = env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string());
    let use_json = env::var(ENV_LOG_JSON)
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    LoggingConfig {
        level: parse_level(&level_str),
        use_json,
        ..Default::default()
    }
}

pub fn init_from_env() {
    init_logging(config_from_env());
}
