//! Memory statistics from `vm_stat` and `sysctl hw.memsize`.

use std::collections::BTreeMap;

use log::{debug, warn};

use super::types::MemorySnapshot;
use super::{round2, BYTES_PER_GB};
use crate::error::Result;
use crate::platform::command::CommandRunner;

/// `vm_stat` counts in pages of this many bytes
pub const PAGE_SIZE_BYTES: u64 = 4096;

/// Parse `vm_stat` output into byte counts.
///
/// `Pages wired down:   123.` becomes `pages_wired_down => 123 * 4096`.
/// Lines whose value is not a page count (the banner, percentages) are skipped.
pub fn parse_vm_stat(output: &str) -> BTreeMap<String, u64> {
    let mut counters = BTreeMap::new();

    for line in output.lines() {
        let parts: Vec<&str> = line.split(':').collect();
        let [key, value] = parts.as_slice() else {
            continue;
        };

        let key = key
            .trim()
            .trim_matches('"')
            .to_lowercase()
            .replace(' ', "_");
        let value = value.trim().trim_end_matches('.');

        match value.parse::<u64>() {
            Ok(pages) => {
                counters.insert(key, pages.saturating_mul(PAGE_SIZE_BYTES));
            }
            Err(_) => debug!("Skipping vm_stat line {:?}", line),
        }
    }

    counters
}

/// Parse `sysctl -n hw.memsize`
pub fn parse_total_memory(output: &str) -> Option<u64> {
    let output = output.trim();
    if output.is_empty() || !output.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    output.parse().ok()
}

/// Derive free/used totals, percentages and GB figures from the counters
pub fn build_snapshot(
    counters: BTreeMap<String, u64>,
    total_physical_memory: Option<u64>,
) -> MemorySnapshot {
    let sum = |keys: &[&str]| -> Option<u64> {
        keys.iter()
            .map(|key| counters.get(*key).copied())
            .sum::<Option<u64>>()
    };

    let free_memory = sum(&["pages_free", "pages_speculative"]);
    let used_memory = sum(&["pages_active", "pages_inactive", "pages_wired_down"]);

    let percent_of_total = |value: Option<u64>| -> Option<f64> {
        match (value, total_physical_memory) {
            (Some(value), Some(total)) if total > 0 => {
                Some(round2(value as f64 / total as f64 * 100.0))
            }
            _ => None,
        }
    };
    let to_gb = |value: Option<u64>| value.map(|v| round2(v as f64 / BYTES_PER_GB));

    MemorySnapshot {
        used_percent: percent_of_total(used_memory),
        free_percent: percent_of_total(free_memory),
        total_physical_memory_gb: to_gb(total_physical_memory),
        used_memory_gb: to_gb(used_memory),
        free_memory_gb: to_gb(free_memory),
        total_physical_memory,
        free_memory,
        used_memory,
        counters,
    }
}

/// Collect the memory snapshot. Fails only when `vm_stat` itself fails.
pub fn collect<R: CommandRunner + ?Sized>(runner: &R) -> Result<MemorySnapshot> {
    let counters = parse_vm_stat(&runner.run("vm_stat", &[])?);

    let total = match runner.run("sysctl", &["-n", "hw.memsize"]) {
        Ok(output) => parse_total_memory(&output),
        Err(e) => {
            warn!("Total physical memory unavailable: {}", e);
            None
        }
    };

    Ok(build_snapshot(counters, total))
}
