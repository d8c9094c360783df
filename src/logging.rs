use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber used by the CLI.
///
/// `quiet` wins over `verbose` and over `RUST_LOG`.
pub fn init(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(if verbose { "tripgen=debug" } else { "tripgen=info" })
        })
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
