//! Diagnostic tracing for odooctl.
//!
//! Commands print their results (instance tables, JSON, picked URLs) on
//! stdout so they can be piped into scripts. Diagnostics never go there: the
//! subscriber installed here writes to stderr and stays quiet unless
//! `RUST_LOG` asks for more.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber.
///
/// ```bash
/// RUST_LOG=odooctl=debug odooctl instances --json > instances.json
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}
