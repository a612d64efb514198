//! Disk capacity from `df -h`.

use log::debug;

use super::types::{DiskSnapshot, DiskSummary, Filesystem};
use super::{round2, BYTES_PER_GB, BYTES_PER_TB};
use crate::core::process_monitor::split_columns;
use crate::error::Result;
use crate::platform::command::CommandRunner;

/// Filesystem Size Used Avail Capacity iused ifree %iused Mounted on
const DF_MIN_COLUMNS: usize = 8;
const DF_COLUMNS: usize = 9;

/// Convert a `df -h` size such as `460Gi` or `1.8T` to bytes.
///
/// Only gigabyte and terabyte suffixes are understood; anything smaller is
/// not worth counting towards the totals and yields `None`.
pub fn parse_size_bytes(size: &str) -> Option<f64> {
    const SUFFIXES: [(&str, f64); 4] = [
        ("Gi", BYTES_PER_GB),
        ("Ti", BYTES_PER_TB),
        ("G", BYTES_PER_GB),
        ("T", BYTES_PER_TB),
    ];

    SUFFIXES.iter().find_map(|(suffix, scale)| {
        size.strip_suffix(suffix)
            .and_then(|number| number.parse::<f64>().ok())
            .map(|number| number * scale)
    })
}

/// Parse `df -h` output, keeping only `/dev/` devices.
///
/// The mount point is everything from the ninth column on, so paths with
/// spaces survive. Rows whose sizes have an unknown suffix are listed but not
/// counted in the summary, which is only produced when some capacity was
/// counted.
pub fn parse_df(output: &str) -> DiskSnapshot {
    let mut snapshot = DiskSnapshot::default();
    let mut total_size = 0.0;
    let mut total_used = 0.0;

    for line in output.lines().skip(1) {
        let parts = split_columns(line, DF_COLUMNS);
        if parts.len() < DF_MIN_COLUMNS || !parts[0].starts_with("/dev/") {
            debug!("Skipping df row {:?}", line);
            continue;
        }

        if let Some(size) = parse_size_bytes(parts[1]) {
            total_size += size;
        }
        if let Some(used) = parse_size_bytes(parts[2]) {
            total_used += used;
        }

        snapshot.filesystems.push(Filesystem {
            filesystem: parts[0].to_string(),
            size: parts[1].to_string(),
            used: parts[2].to_string(),
            available: parts[3].to_string(),
            use_percent: parts[4].to_string(),
            mounted_on: parts[parts.len() - 1].to_string(),
        });
    }

    if total_size > 0.0 {
        snapshot.summary = Some(DiskSummary {
            total_size_gb: round2(total_size / BYTES_PER_GB),
            total_used_gb: round2(total_used / BYTES_PER_GB),
            total_available_gb: round2((total_size - total_used) / BYTES_PER_GB),
            overall_usage_percent: round2(total_used / total_size * 100.0),
        });
    }

    snapshot
}

/// Collect the disk snapshot. Fails only when `df` itself fails.
pub fn collect<R: CommandRunner + ?Sized>(runner: &R) -> Result<DiskSnapshot> {
    Ok(parse_df(&runner.run("df", &["-h"])?))
}
