use anyhow::Result;

use super::{load_monitor, print_json};

pub fn execute() -> Result<()> {
    let monitor = load_monitor()?;
    print_json(&monitor.resource_intensive_processes())
}
