// ABOUTME: Tracing subscriber setup
// ABOUTME: Shared by binaries so log output looks the same everywhere

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG` and defaults to `info`. Calling it twice is harmless,
/// the second installation is ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init();
}
