//! Logging for adapter construction, invocation and connections
//!
//! Uses `tracing` for structured logging. Construction events log at
//! debug, per-call events at trace, rejected connections at warn.

use crate::errors::ProxyError;
use serde::{Deserialize, Serialize};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

pub use tracing::{debug, error, info, trace, warn, Level};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format with timestamps
    Pretty,
    /// Compact format for production
    #[default]
    Compact,
    /// JSON format for structured logging
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for this crate when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
    /// Emit span enter/exit events
    pub span_events: bool,
    /// Custom filter directives, overriding `level`
    pub filter: Option<String>,
    /// Write to a daily-rotated file in this directory instead of stderr
    pub directory: Option<String>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            span_events: false,
            filter: None,
            directory: None,
            file_prefix: "sigproxy.log".to_string(),
        }
    }
}

/// Initialize the global subscriber.
///
/// Returns the writer guard, which must outlive all logging, or `None`
/// when a subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = build_filter(config);
    let spans = span_events_config(config.span_events);

    let (writer, guard) = match &config.directory {
        Some(directory) => {
            tracing_appender::non_blocking(rolling::daily(directory, &config.file_prefix))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let installed = match config.format {
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_writer(writer)
                .pretty()
                .with_span_events(spans)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .with_writer(writer)
                .compact()
                .with_span_events(spans)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()
        }
        LogFormat::Json => {
            let layer = fmt::layer()
                .with_writer(writer)
                .json()
                .with_span_events(spans)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()
        }
    };

    installed.ok().map(|_| guard)
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives = config
            .filter
            .clone()
            .unwrap_or_else(|| format!("sigproxy={}", config.level));
        EnvFilter::new(directives)
    })
}

fn span_events_config(enabled: bool) -> FmtSpan {
    if enabled {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

/// Log a type registration
#[inline]
pub fn log_type_registered(name: &str, rust_type: &str) {
    debug!(
        target: "sigproxy::meta",
        name,
        rust_type,
        "registered meta type"
    );
}

/// Log a synthesized adapter
#[inline]
pub fn log_adapter_created(signature_in: &str, signature_out: &str) {
    debug!(
        target: "sigproxy::adapter",
        signature_in,
        signature_out,
        "adapter created"
    );
}

/// Log an adapter that could not be built
#[inline]
pub fn log_adapter_rejected(callable: &str, error: &ProxyError) {
    debug!(
        target: "sigproxy::adapter",
        callable,
        %error,
        "adapter construction failed"
    );
}

/// Log an invocation
#[inline]
pub fn log_invoke(signature_in: &str, args: usize) {
    trace!(
        target: "sigproxy::invoke",
        signature = signature_in,
        args,
        "invoke"
    );
}

/// Log a result handed to the host
#[inline]
pub fn log_delivery(connection: u64, has_result: bool) {
    trace!(
        target: "sigproxy::connections",
        connection,
        has_result,
        "delivering to receiver"
    );
}

/// Log a rejected connection
#[inline]
pub fn log_connection_rejected(signal: &str, method: &str, error: &ProxyError) {
    warn!(
        target: "sigproxy::connections",
        signal,
        method,
        %error,
        "connection rejected"
    );
}
