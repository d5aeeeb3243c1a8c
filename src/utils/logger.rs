//! Logger setup for the pruning pipeline
//!
//! Diagnostics go to stderr so the stdout report stays machine-comparable.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global tracing subscriber at `level` for this crate.
///
/// `RUST_LOG` wins when set. Returns false if a subscriber was already installed.
pub fn init_logging(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("uprune={}", level)));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).is_ok()
}
