//! Logging initialization.
//!
//! Uses `tracing` with `tracing-subscriber`. The level is controlled by the
//! `RUST_LOG` environment variable; without it the search pipeline logs the
//! policy snapshot and the exact query text of every request at info level.
//!
//! ```bash
//! # Show bound values and trailing-statement execution too
//! RUST_LOG=sqli_lab=debug sqli-lab start
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "sqli_lab=info,tower_http=info";

/// Install the global subscriber, writing to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}
