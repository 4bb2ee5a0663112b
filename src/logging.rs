//! Logging and tracing setup for the CLI.
//!
//! Logs are written to **stderr** so that stdout only ever carries rendered
//! schema output. Logging is off unless `TFSCHEMA_LOG` is set.
//!
//! # Examples
//!
//! ```bash
//! # Show what the schema source is doing
//! TFSCHEMA_LOG=debug tfschema resource show aws_instance
//!
//! # Only this crate, at trace level
//! TFSCHEMA_LOG=tfschema=trace tfschema data list aws
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "TFSCHEMA_LOG";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn stderr_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer::<S>()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

/// Initialize the default logging subscriber.
///
/// Reads the filter from `TFSCHEMA_LOG`; when it is unset or invalid,
/// nothing is logged.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging() {
    init_logging_with_default("off");
}

/// Initialize logging with a custom default level.
///
/// Like [`init_logging`], but `default_level` is used when `TFSCHEMA_LOG`
/// is not set.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging_with_default(default_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(stderr_layer())
        .init();
}

/// Try to initialize logging, returning false if already initialized.
pub fn try_init_logging() -> bool {
    tracing_subscriber::registry()
        .with(env_filter("off"))
        .with(stderr_layer())
        .try_init()
        .is_ok()
}
