//! Logging configuration using tracing
//!
//! Structured logging to stderr with support for the RUST_LOG environment
//! variable. Stdout stays reserved for exported records.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber
///
/// Filtering follows RUST_LOG and defaults to "warn" so normal runs stay
/// quiet. Skipped files during directory scans are reported at warn level;
/// per-line parse decisions at debug.
///
/// # Errors
/// Returns an error if a subscriber has already been initialized
pub fn init() -> crate::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| crate::MaillogError::Other(format!("failed to initialize tracing: {e}")))?;

    Ok(())
}

/// Initialize logging for tests (no-op if already initialized)
pub fn init_test() {
    let _ = init();
}
