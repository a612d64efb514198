//! CPU usage, load average and core count.

use log::{debug, warn};

use super::round2;
use super::types::{CpuSnapshot, LoadAverage};
use crate::error::{ResmonError, Result};
use crate::platform::command::CommandRunner;

const USAGE_MARKER: &str = "CPU usage:";
const TOP_LOAD_MARKER: &str = "Load Avg:";

/// Parse the summary header of `top -l 1 -n 0`.
///
/// ```text
/// CPU usage: 12.34% user, 5.67% sys, 81.99% idle
/// Load Avg: 7.95, 7.63, 8.14
/// ```
///
/// Each usage token is read on its own, so one odd token does not lose the
/// others. The load average is only set when every value on its line parses.
pub fn parse_top_summary(output: &str) -> CpuSnapshot {
    let mut snapshot = CpuSnapshot::default();

    for line in output.lines() {
        if let Some(idx) = line.find(USAGE_MARKER) {
            parse_usage(&line[idx + USAGE_MARKER.len()..], &mut snapshot);
        } else if let Some(idx) = line.find(TOP_LOAD_MARKER) {
            let values: std::result::Result<Vec<f64>, _> = line[idx + TOP_LOAD_MARKER.len()..]
                .split(',')
                .map(|value| value.trim().parse::<f64>())
                .collect();
            match values {
                Ok(values) => snapshot.load_average = Some(LoadAverage::from_slots(&values)),
                Err(e) => warn!("Could not parse load average line {:?}: {}", line, e),
            }
        }
    }

    if let Some(idle) = snapshot.idle_percent {
        snapshot.total_usage_percent = Some(round2(100.0 - idle));
    }

    snapshot
}

fn parse_usage(tokens: &str, snapshot: &mut CpuSnapshot) {
    for token in tokens.split(',').map(str::trim) {
        let Some((value, label)) = token.split_once('%') else {
            debug!("Skipping CPU usage token {:?}", token);
            continue;
        };
        let Ok(value) = value.trim().parse::<f64>() else {
            warn!("Could not parse CPU usage token {:?}", token);
            continue;
        };

        if label.contains("user") {
            snapshot.user_percent = Some(value);
        } else if label.contains("sys") {
            snapshot.system_percent = Some(value);
        } else if label.contains("idle") {
            snapshot.idle_percent = Some(value);
        }
    }
}

/// Read the load average out of `uptime` output.
///
/// Handles both `load average: 0.10, 0.20, 0.30` and the macOS
/// `load averages: 1.91 2.03 2.09`. Slots that are missing or not numbers
/// become 0.0. Returns `None` when there is no load section at all.
pub fn parse_uptime_load(output: &str) -> Option<LoadAverage> {
    let rest = ["load averages:", "load average:"]
        .iter()
        .find_map(|marker| output.find(marker).map(|idx| &output[idx + marker.len()..]))?;

    let values: Vec<f64> = rest
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .take(3)
        .map(|token| token.parse::<f64>().unwrap_or(0.0))
        .collect();

    Some(LoadAverage::from_slots(&values))
}

/// Parse `sysctl -n hw.ncpu`
pub fn parse_core_count(output: &str) -> Option<u32> {
    let output = output.trim();
    if output.is_empty() || !output.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    output.parse().ok()
}

/// Collect the CPU snapshot.
///
/// `top` provides usage and usually the load average; `uptime` fills in the
/// load when `top` did not; `sysctl` gives the core count. Each source is
/// optional. The snapshot only fails when none of them answered.
pub fn collect<R: CommandRunner + ?Sized>(runner: &R) -> Result<CpuSnapshot> {
    let mut answered = false;

    let mut snapshot = match runner.run("top", &["-l", "1", "-n", "0"]) {
        Ok(output) => {
            answered = true;
            parse_top_summary(&output)
        }
        Err(e) => {
            warn!("CPU usage unavailable: {}", e);
            CpuSnapshot::default()
        }
    };

    if snapshot.load_average.is_none() {
        let load = match runner.run("uptime", &[]) {
            Ok(output) => {
                answered = true;
                parse_uptime_load(&output).unwrap_or_default()
            }
            Err(e) => {
                warn!("Load average unavailable: {}", e);
                LoadAverage::default()
            }
        };
        snapshot.load_average = Some(load);
    }

    match runner.run("sysctl", &["-n", "hw.ncpu"]) {
        Ok(output) => {
            answered = true;
            snapshot.cores = parse_core_count(&output);
        }
        Err(e) => warn!("CPU core count unavailable: {}", e),
    }

    if !answered {
        return Err(ResmonError::metric_collection(
            "no CPU statistics source responded",
        ));
    }

    Ok(snapshot)
}
