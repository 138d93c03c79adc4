//! `tracing` subscriber setup for the binary.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Installs a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at `info`, or `debug`
/// with `verbose`. Calling this twice is a no-op.
pub fn init(verbose: bool) {
    let default = if verbose { "gridmix=debug" } else { "gridmix=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
