// Tracing initialization with a configurable level.
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `level` is an `EnvFilter` directive; an unparsable one falls back to `info`
pub fn init_tracing_with_level(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}
