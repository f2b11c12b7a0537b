//! Logging setup
//!
//! The crate logs through the `log` facade: pass statistics at `debug`,
//! aborted passes, failing listeners and pool overflow at `warn`, ignored
//! markup at `trace`. Hosts install whatever logger they like; these helpers
//! install `env_logger` for demos and tests.

pub use log::{debug, info, warn, error, trace};

/// Install `env_logger` at `info`, overridable through `RUST_LOG`
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    init_with_level(log::LevelFilter::Info);
}

/// Install `env_logger` with a default level, overridable through `RUST_LOG`
pub fn init_with_level(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .is_test(cfg!(test))
        .try_init();
}
