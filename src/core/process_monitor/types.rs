use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResmonError;

/// One observed OS process.
///
/// Only the metrics of the category the record was parsed for are set; the
/// others stay `None` and are left out of the JSON entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resident_memory_kb: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_connections: Option<u64>,
}

impl ProcessRecord {
    pub fn cpu(pid: u32, cpu_percent: f64, command: impl Into<String>) -> Self {
        Self {
            pid: Some(pid),
            command: command.into(),
            cpu_percent: Some(cpu_percent),
            memory_percent: None,
            resident_memory_kb: None,
            network_connections: None,
        }
    }

    pub fn memory(
        pid: u32,
        memory_percent: f64,
        resident_memory_kb: u64,
        command: impl Into<String>,
    ) -> Self {
        Self {
            pid: Some(pid),
            command: command.into(),
            cpu_percent: None,
            memory_percent: Some(memory_percent),
            resident_memory_kb: Some(resident_memory_kb),
            network_connections: None,
        }
    }

    pub fn network(pid: Option<u32>, command: impl Into<String>, connections: u64) -> Self {
        Self {
            pid,
            command: command.into(),
            cpu_percent: None,
            memory_percent: None,
            resident_memory_kb: None,
            network_connections: Some(connections),
        }
    }
}

/// Process category a query is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cpu,
    Memory,
    Network,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Cpu, Category::Memory, Category::Network];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Memory => "memory",
            Category::Network => "network",
        }
    }

    /// Metric the source command already orders by; what `auto` resolves to
    pub fn default_sort_field(&self) -> SortField {
        match self {
            Category::Cpu => SortField::CpuPercent,
            Category::Memory => SortField::MemoryPercent,
            Category::Network => SortField::NetworkConnections,
        }
    }

    pub fn sort_fields(&self) -> &'static [SortField] {
        match self {
            Category::Cpu => &[SortField::CpuPercent, SortField::Pid, SortField::Command],
            Category::Memory => &[
                SortField::MemoryPercent,
                SortField::ResidentMemoryKb,
                SortField::Pid,
                SortField::Command,
            ],
            Category::Network => &[
                SortField::NetworkConnections,
                SortField::Pid,
                SortField::Command,
            ],
        }
    }

    pub fn supports(&self, field: SortField) -> bool {
        self.sort_fields().contains(&field)
    }

    /// Every accepted `sort_by` value, `auto` first
    pub fn sort_options(&self) -> Vec<&'static str> {
        std::iter::once(AUTO_SORT)
            .chain(self.sort_fields().iter().map(SortField::as_str))
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ResmonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
                ResmonError::invalid_argument(format!(
                    "Invalid process_type '{}'. Must be one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// `sort_by` value that picks the category's default metric
pub const AUTO_SORT: &str = "auto";

/// Field a process list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Pid,
    Command,
    CpuPercent,
    MemoryPercent,
    ResidentMemoryKb,
    NetworkConnections,
}

impl SortField {
    const ALL: [SortField; 6] = [
        SortField::Pid,
        SortField::Command,
        SortField::CpuPercent,
        SortField::MemoryPercent,
        SortField::ResidentMemoryKb,
        SortField::NetworkConnections,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Pid => "pid",
            SortField::Command => "command",
            SortField::CpuPercent => "cpu_percent",
            SortField::MemoryPercent => "memory_percent",
            SortField::ResidentMemoryKb => "resident_memory_kb",
            SortField::NetworkConnections => "network_connections",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        SortField::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Lenient parse: anything other than `asc`/`desc` means `desc`
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}
