// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the tracing subscriber.
/// Filter directives come from the `RUST_LOG` environment variable;
/// the default level is "info".
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).init();

    tracing::debug!("Logging setup complete.");
}
