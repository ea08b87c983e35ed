//! Log output for the CLI
//!
//! Events go to stderr so that stdout stays reserved for command output.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Default filter directive for the given verbosity flags.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the flags.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let subscriber = tracing_subscriber::registry().with(filter).with(layer);

    // Ignore the error if a subscriber is already installed
    let _ = tracing::subscriber::set_global_default(subscriber);
}
