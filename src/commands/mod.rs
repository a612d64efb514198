// Command handlers module
pub mod completions;
pub mod config;
pub mod intensive;
pub mod overview;
pub mod processes;
pub mod serve;
pub mod tool;
pub mod version;

// Re-exports for cleaner imports
pub use intensive::execute as intensive;
pub use overview::execute as overview;
pub use version::execute as version;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{Config, ResourceMonitor};

/// Monitor backed by the real system tools, configured from the user's config file
pub(crate) fn load_monitor() -> Result<ResourceMonitor> {
    let config = Config::load().context("Failed to load configuration")?;
    Ok(ResourceMonitor::from_config(config))
}

/// Pretty-print a response as JSON on stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize response")?;
    println!("{}", json);
    Ok(())
}
