//! Tracing initialisation for the `check` binary.
//!
//! Logs always go to stderr: stdout carries the protocol response and
//! nothing else may be written there.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable selecting the log line format.
pub const LOG_FORMAT_ENV: &str = "PR_RESOURCE_LOG_FORMAT";

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    /// Newline-delimited JSON, for log aggregation pipelines.
    Json,
}

impl LogFormat {
    /// `json` (any case) selects [`LogFormat::Json`]; anything else is text.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }

    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(LOG_FORMAT_ENV).ok().as_deref())
    }
}

/// Initialise the global tracing subscriber.
///
/// Respects `RUST_LOG`; falls back to `level` when it is unset or invalid.
/// Only the first call takes effect.
pub fn init_tracing(format: LogFormat, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false).json())
            .try_init()
            .ok(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()
            .ok(),
    };
}
