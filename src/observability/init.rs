//! Tracing initialization.
//!
//! Sets up a `tracing-subscriber` fmt pipeline writing to stderr, filtered
//! by the configured trace level (overridable via `RUST_LOG`). Observability
//! is optional: initialization failures are swallowed, and calling twice is
//! safe (only the first call takes effect).

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// Level resolution: `RUST_LOG` if set, else `trace_level`, else `info`.
pub fn init_tracing(trace_level: Option<&str>) {
    let default_level = trace_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
