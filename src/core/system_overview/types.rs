use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::process_monitor::ProcessRecord;

/// 1, 5 and 15 minute load averages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadAverage {
    #[serde(rename = "1min")]
    pub one: f64,
    #[serde(rename = "5min")]
    pub five: f64,
    #[serde(rename = "15min")]
    pub fifteen: f64,
}

impl LoadAverage {
    /// Build from up to three values, missing slots default to 0.0
    pub fn from_slots(values: &[f64]) -> Self {
        let slot = |i: usize| values.get(i).copied().unwrap_or(0.0);
        Self {
            one: slot(0),
            five: slot(1),
            fifteen: slot(2),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_average: Option<LoadAverage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cores: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_usage_percent: Option<f64>,
}

/// Memory figures in bytes.
///
/// `counters` holds every `vm_stat` counter already converted from pages,
/// keyed like `pages_free`; the remaining fields are derived from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemorySnapshot {
    #[serde(flatten)]
    pub counters: BTreeMap<String, u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_physical_memory: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_memory: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_memory: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_physical_memory_gb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_memory_gb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_memory_gb: Option<f64>,
}

/// One `df` row, values exactly as reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filesystem {
    pub filesystem: String,
    pub size: String,
    pub used: String,
    pub available: String,
    pub use_percent: String,
    pub mounted_on: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiskSummary {
    pub total_size_gb: f64,
    pub total_used_gb: f64,
    pub total_available_gb: f64,
    pub overall_usage_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskSnapshot {
    pub filesystems: Vec<Filesystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<DiskSummary>,
}

/// Counters for one `netstat -i` interface, as reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceStats {
    pub packets_in: String,
    pub errors_in: String,
    pub packets_out: String,
    pub errors_out: String,
    pub collisions: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionCounts {
    pub tcp_connections: usize,
    pub udp_connections: usize,
    pub total_connections: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub interfaces: BTreeMap<String, InterfaceStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<ConnectionCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_network_processes: Option<Vec<ProcessRecord>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macos_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_in_users: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_processes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel_version: Option<String>,
}
