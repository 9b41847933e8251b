//! Sets up logging for the host application.

use tracing_subscriber::{
    EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install the global tracing subscriber.
///
/// Logs are written to stdout, filtered by the `RUST_LOG` environment
/// variable when set and at the `info` level otherwise. The host shell
/// should call this once at startup, before touching any store.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty().with_filter(filter))
        .init();
}
