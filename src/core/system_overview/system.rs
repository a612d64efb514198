//! Uptime, OS version, logged-in users and process count.

use log::warn;
use sysinfo::System;

use super::types::SystemSnapshot;
use crate::core::process_monitor::{list_processes, Category};
use crate::error::Result;
use crate::platform::command::CommandRunner;

/// Uptime as `uptime` phrases it, e.g. `3 days` or `2:04`
pub fn parse_uptime_duration(output: &str) -> Option<String> {
    let idx = output.find("up")?;
    let duration = output[idx + 2..].split(',').next()?.trim();
    (!duration.is_empty()).then(|| duration.to_string())
}

/// Number of logged-in users from `uptime`.
///
/// The count is the word right before `user`; when that word is not a number
/// one user is assumed.
pub fn parse_logged_in_users(output: &str) -> Option<u32> {
    let head = output.split("load average").next()?;
    let idx = head.find("user")?;
    let count = head[..idx].split_whitespace().last()?;
    Some(count.parse().unwrap_or(1))
}

/// Collect the system snapshot; every field is best effort.
pub fn collect<R: CommandRunner + ?Sized>(runner: &R) -> Result<SystemSnapshot> {
    let mut snapshot = SystemSnapshot::default();

    match runner.run("uptime", &[]) {
        Ok(output) => {
            snapshot.uptime = parse_uptime_duration(&output);
            snapshot.logged_in_users = parse_logged_in_users(&output);
        }
        Err(e) => warn!("Uptime unavailable: {}", e),
    }

    match runner.run("sw_vers", &["-productVersion"]) {
        Ok(output) if !output.is_empty() => snapshot.macos_version = Some(output),
        Ok(_) => {}
        Err(e) => warn!("OS version unavailable: {}", e),
    }

    match list_processes(runner, Category::Cpu, None) {
        Ok(processes) => snapshot.total_processes = Some(processes.len()),
        Err(e) => warn!("Process count unavailable: {}", e),
    }

    snapshot.host_name = System::host_name();
    snapshot.kernel_version = System::kernel_version();

    Ok(snapshot)
}
