//! Diagnostic logging through `tracing`, written to stderr so it never mixes
//! with the tables printed on stdout.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps the `-v` count to a level: none is `warn`, one is `info`, more is `debug`.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the verbosity.
pub fn init_logging(verbosity: u8) {
    let level = level_for(verbosity).as_str().to_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,airline={level}")));

    // ignore a second install, e.g. when called from tests
    let _ = tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}
