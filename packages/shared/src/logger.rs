//! Logging setup for the domino relay binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the server and client library crates as well as the
/// calling binary. It can be overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "domino_server", "domino_client")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use domino_shared::logger::setup_logger;
///
/// setup_logger("domino_server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the fallback filter directive used when `RUST_LOG` is unset.
fn default_filter(binary_name: &str, level: &str) -> String {
    let binary = binary_name.replace('-', "_");
    format!(
        "domino_server={level},domino_client={level},{binary}={level},tower_http={level}"
    )
}
