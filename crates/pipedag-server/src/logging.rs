//! Structured logging setup.
//!
//! Installs a `tracing` subscriber that writes to stderr, so `check` output
//! on stdout stays machine-readable. `RUST_LOG`, when set, replaces the
//! level derived from `--quiet`/`--verbose`.
use tracing::Level;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::LogFormat;
use crate::error::ServerError;

/// Logging options derived from the global CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    /// Line format.
    pub format: LogFormat,
    /// Most verbose level emitted by pipedag itself.
    pub level: Level,
}

impl LogConfig {
    /// Maps `--quiet` to `ERROR`, `--verbose` to `DEBUG`, and neither to
    /// `INFO`.
    pub fn from_flags(format: LogFormat, quiet: bool, verbose: bool) -> Self {
        let level = if quiet {
            Level::ERROR
        } else if verbose {
            Level::DEBUG
        } else {
            Level::INFO
        };
        Self { format, level }
    }

    /// Filter directive used when `RUST_LOG` is not set.
    ///
    /// pipedag targets and request tracing follow the configured level;
    /// everything else is held at `warn`.
    pub fn filter_directive(&self) -> String {
        let level = self.level.to_string().to_lowercase();
        format!("warn,pipedag={level},pipedag_server={level},tower_http={level}")
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns [`ServerError::Logging`] if a global subscriber is already set.
pub fn init(config: LogConfig) -> Result<(), ServerError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    let fmt_layer = match config.format {
        LogFormat::Human => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact()
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .json()
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ServerError::Logging(e.to_string()))
}
