/// Telemetry
///
/// One JSON subscriber for the whole process. Handlers and the auth gate log
/// through `tracing`; actix's `Logger` and `RequestLogger` go through the
/// `log` facade, which the subscriber picks up on `init`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when `RUST_LOG` is unset or unparseable
pub const DEFAULT_LOG_FILTER: &str = "info";

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber. Call once, before the server starts.
pub fn init_telemetry() {
    let json_lines = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(false)
        .with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(log_filter())
        .with(json_lines)
        .init();
}
