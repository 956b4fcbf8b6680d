//! Development-time tracing.
//!
//! Diagnostics go to stderr and are filtered with `RUST_LOG`. Audit and
//! report files are product output and are written regardless.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber. Defaults to `warn` when `RUST_LOG` is
/// unset.
///
/// ```bash
/// RUST_LOG=ballot_tally=debug ballot-tally run IR_given.csv
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
