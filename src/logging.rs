//! Logging init: stderr subscriber, level picked from `LOG_LEVEL`.

use tracing_subscriber::EnvFilter;

/// Initialize a stderr tracing subscriber. `LOG_LEVEL` selects the
/// verbosity; an unrecognized value falls back to INFO with a notice
/// instead of failing the run.
pub fn init_logging() {
    let filter = match std::env::var("LOG_LEVEL") {
        Ok(raw) => EnvFilter::try_new(raw.to_lowercase()).unwrap_or_else(|_| {
            eprintln!("LOG_LEVEL not understood - setting log level as INFO.");
            EnvFilter::new("info")
        }),
        Err(_) => EnvFilter::new("info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
