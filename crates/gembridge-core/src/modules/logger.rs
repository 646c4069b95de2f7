//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber, logging to stderr.
///
/// `RUST_LOG` overrides `default_level`. Returns `false` if a subscriber
/// was already installed.
pub fn init_logger(default_level: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
