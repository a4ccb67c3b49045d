//! Diagnostic output on stderr.
//!
//! stdout carries the encoded `CodeGeneratorResponse` in plugin mode, so
//! nothing but the response may be written there.

use tracing_subscriber::EnvFilter;

/// Level used before a configuration is available
pub const DEFAULT_LEVEL: &str = "info";

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins over `level`. Calling this more than once is a no-op.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Ignore the error if a subscriber is already set
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
