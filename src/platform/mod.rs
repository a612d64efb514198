// Platform-specific code module

pub mod command;

// Re-exports para imports limpios
pub use command::{CannedRunner, CommandError, CommandRunner, SystemCommandRunner};
