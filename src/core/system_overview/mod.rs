//! System-wide snapshots.
//!
//! Each submodule runs the macOS tools for one resource, parses their output
//! and builds a snapshot. `analysis` scores the combined result.

pub mod analysis;
pub mod cpu;
pub mod disk;
pub mod memory;
pub mod network;
pub mod system;
pub mod types;

pub use analysis::{analyze, AnalysisInput, AnalysisResult, AnalysisThresholds, PerformanceStatus};
pub use types::{
    ConnectionCounts, CpuSnapshot, DiskSnapshot, DiskSummary, Filesystem, InterfaceStats,
    LoadAverage, MemorySnapshot, NetworkSnapshot, SystemSnapshot,
};

pub(crate) const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;
pub(crate) const BYTES_PER_TB: f64 = BYTES_PER_GB * 1024.0;

/// Round to two decimals
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
