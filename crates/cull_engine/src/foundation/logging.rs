//! Logging utilities
//!
//! The library only talks to the `log` facade; binaries pick the backend.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Honors `RUST_LOG`, falling back to `default_filter` when it is unset.
/// Safe to call more than once; later calls are ignored.
pub fn init(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}
