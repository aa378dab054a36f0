//! Diagnostic output setup

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Send tracing output to stderr at `level`. `RUST_LOG`, when set, refines
/// the filter further.
pub fn init(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // A subscriber may already be installed by a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
