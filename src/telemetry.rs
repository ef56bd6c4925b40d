//! # Telemetry
//!
//! Opt-in tracing initialization for host applications and tests.

/// Initializes the global tracing subscriber.
///
/// Installs an env-filtered JSON formatter defaulting to `INFO`. Calling
/// this more than once is harmless; subsequent calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .json()
        .try_init();
}
