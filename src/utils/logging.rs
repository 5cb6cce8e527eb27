//! Console logging setup.
//!
//! Warnings and errors go to standard error, everything below to
//! standard output, each line carrying the subscriber's timestamp. The
//! filter defaults to `info` and can be overridden with `MBOXCTL_LOG`.
//!
//! Command results ("Ping: Success") are product output, printed
//! directly to stdout; they do not pass through the logger.

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the log filter.
pub const LOG_ENV: &str = "MBOXCTL_LOG";

/// Install the global console subscriber.
///
/// A second call is a no-op: the first subscriber stays installed.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .try_init();
}
