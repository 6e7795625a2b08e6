//! Structured logging foundation.
//!
//! Dual-mode: human-readable console output for interactive use, JSONL for
//! automation. stdout is reserved for command payloads; all log output goes
//! to stderr. The filter honors CW_LOG, then RUST_LOG, then the configured
//! default level.

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default level directive when no env filter is set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Human,
        }
    }
}

/// Initialize the logging subsystem. Call once at startup; repeated calls
/// are ignored.
pub fn init_logging(config: &LogConfig) {
    // The default directive must cover both the library and the `cw`
    // binary target, or CLI-side log lines are filtered out.
    let filter = EnvFilter::try_from_env("CW_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| {
            EnvFilter::new(format!("cw={level},cw_core={level}", level = config.level))
        });

    match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr)
                .with_target(false);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init();
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer().json().with_writer(std::io::stderr);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init();
        }
    }
}
