// resmon Library - Public API

// Re-export error types
pub mod error;
pub use error::{ResmonError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;

// Re-export commonly used types
pub use core::config::Config;
pub use core::monitor::ResourceMonitor;

// Initialize logging. Defaults to warnings only so stdout stays clean JSON;
// RUST_LOG overrides it.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}
