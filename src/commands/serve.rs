use anyhow::{Context, Result};
use log::info;
use std::io;

use super::load_monitor;
use crate::core::tools;

/// Line-delimited JSON dispatcher: one request per stdin line, one response
/// per stdout line, until EOF.
pub fn execute() -> Result<()> {
    let monitor = load_monitor()?;

    info!("Serving tool requests on stdin");

    let answered = tools::serve(&monitor, io::stdin().lock(), io::stdout().lock())
        .context("Tool dispatcher stopped")?;

    info!("Input closed after {} requests, stopping", answered);
    Ok(())
}
