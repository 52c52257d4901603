// ── Diagnostics ───────────────────────────────────────────────────────────────
//
// Background conditions (missing dictionary, failed autosave) are never shown
// to the user; they go to stderr through `tracing`.  The filter comes from
// settings, not the environment.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.  Safe to call more than once; later calls
/// are ignored.
pub(crate) fn init(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(filter = level, "logging initialised");
    }
}
