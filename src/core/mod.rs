// Core business logic module

pub mod config;
pub mod fault;
pub mod monitor;
pub mod process_monitor;
pub mod system_overview;
pub mod tools;

// Re-export commonly used items
pub use config::Config;
pub use fault::{attempt, Outcome};
pub use monitor::{CategoryQuery, CategoryResponse, IntensiveProcesses, ResourceMonitor, SystemOverview};
pub use tools::{call_tool, handle_line, list_tools, serve, Tool, ToolRequest, ToolResponse};
