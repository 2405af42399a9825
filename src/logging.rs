//! Logging setup
//!
//! The crate only emits `tracing` events. Applications that want to see
//! them can install a subscriber here or bring their own.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter` (e.g. `"rancher_api=debug"`).
///
/// Returns false if a global subscriber was already set.
pub fn init(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_only_installs_once() {
        // The first call may lose to a subscriber set elsewhere in the process
        let _ = init("rancher_api=debug");
        assert!(!init("rancher_api=debug"));
    }
}
