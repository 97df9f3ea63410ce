//! Logging setup using tracing-subscriber

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or info
/// lines for each pipeline stage when `verbose` is set. Calling this twice is
/// harmless.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "hausprep=info" } else { "hausprep=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
