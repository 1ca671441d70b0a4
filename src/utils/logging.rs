//! Logging initialization
//!
//! JSON lines for log shippers, human-readable output otherwise.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingSettings;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this
/// twice is harmless: the second registration is ignored.
pub fn init_logging(settings: &LoggingSettings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str()));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if settings.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stdout),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .try_init()
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
    }
}
