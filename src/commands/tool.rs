use anyhow::{Context, Result};
use clap::ArgMatches;
use serde_json::Value;

use super::{load_monitor, print_json};
use crate::core::call_tool;

/// Invoke one query by its tool name, with optional JSON arguments
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let name = matches
        .get_one::<String>("name")
        .context("Tool name argument is required")?;

    let arguments = matches
        .get_one::<String>("args")
        .map(|raw| serde_json::from_str::<Value>(raw))
        .transpose()
        .context("--args must be a JSON object")?;

    let monitor = load_monitor()?;
    let result = call_tool(&monitor, name, arguments)?;
    print_json(&result)
}
