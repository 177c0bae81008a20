//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! LOG_LEVEL sets the filter — a bare level ("debug") or full directives
//! ("info,question=debug,preppal=debug"). LOG_FORMAT picks "pretty"
//! (default) or "json" structured output.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,question=debug,preppal=debug";

pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    // The two branches build different subscriber types, so init inside each.
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
