//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system.
///
/// Filtering follows the `RUST_LOG` environment variable. Calling this more
/// than once is harmless; later calls are ignored.
pub fn init() {
    let _ = env_logger::Builder::from_default_env().try_init();
}
