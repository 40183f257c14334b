//! Tracing infrastructure for the command-line tool
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=recsv=trace` - module-level filtering

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the console tracing subscriber
///
/// Respects RUST_LOG for filtering and defaults to `warn`. Output goes
/// to stderr so recoded CSV on stdout stays clean.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    tracing_subscriber::registry().with(console_layer).init();
}
