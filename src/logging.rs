//! Logging setup using the `tracing` ecosystem.
//!
//! ```text
//! init_logging(verbosity, default)
//!        |
//!        v
//!    registry -> fmt layer (stderr) + EnvFilter
//!
//! filter: RUST_LOG, else -v count, else config `log_level`
//! ```
//!
//! Logs go to stderr; stdout carries only the release name so callers can
//! capture it.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::{ReleaseError, Result};

/// Map the number of `-v` flags to a filter directive.
///
/// With no flags the configured default is used.
pub fn filter_for_verbosity(verbosity: u8, default: &str) -> String {
    match verbosity {
        0 => default.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the verbosity flags when it is set.
pub fn init_logging(verbosity: u8, default: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) if verbosity == 0 => filter,
        _ => EnvFilter::try_new(filter_for_verbosity(verbosity, default))
            .map_err(|e| ReleaseError::config(format!("invalid log_level: {}", e)))?,
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .map_err(|e| ReleaseError::config(format!("logging already initialised: {}", e)))
}
