//! Performance analysis.
//!
//! Scores a system snapshot against fixed thresholds and lists the
//! bottlenecks found, with a recommendation for each.

use serde::{Deserialize, Serialize};

use super::types::{CpuSnapshot, DiskSnapshot, MemorySnapshot};

const PERFECT_SCORE: i32 = 100;

/// Thresholds for the analysis rules
#[derive(Debug, Clone)]
pub struct AnalysisThresholds {
    pub cpu_critical: f64,    // Bottleneck above (%)
    pub cpu_warning: f64,     // Recommendation above (%)
    pub load_per_core: f64,   // 1 minute load per core
    pub memory_critical: f64, // Bottleneck above (%)
    pub memory_warning: f64,  // Recommendation above (%)
    pub disk_critical: f64,   // Bottleneck above (%)
    pub disk_warning: f64,    // Recommendation above (%)
}

impl Default for AnalysisThresholds {
    fn default() -> Self {
        Self {
            cpu_critical: 80.0,
            cpu_warning: 60.0,
            load_per_core: 1.0,
            memory_critical: 85.0,
            memory_warning: 70.0,
            disk_critical: 90.0,
            disk_warning: 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PerformanceStatus {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 80 => PerformanceStatus::Excellent,
            s if s >= 60 => PerformanceStatus::Good,
            s if s >= 40 => PerformanceStatus::Fair,
            _ => PerformanceStatus::Poor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: PerformanceStatus,
    pub bottlenecks: Vec<String>,
    pub recommendations: Vec<String>,
    pub performance_score: u8,
}

/// The handful of figures the rules look at; `None` skips the rule
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalysisInput {
    pub cpu_usage_percent: Option<f64>,
    pub load_one_minute: Option<f64>,
    pub cores: Option<u32>,
    pub memory_used_percent: Option<f64>,
    pub disk_used_percent: Option<f64>,
}

impl AnalysisInput {
    pub fn from_snapshots(
        cpu: Option<&CpuSnapshot>,
        memory: Option<&MemorySnapshot>,
        disk: Option<&DiskSnapshot>,
    ) -> Self {
        Self {
            cpu_usage_percent: cpu.and_then(|c| c.total_usage_percent),
            load_one_minute: cpu.and_then(|c| c.load_average).map(|l| l.one),
            cores: cpu.and_then(|c| c.cores),
            memory_used_percent: memory.and_then(|m| m.used_percent),
            disk_used_percent: disk
                .and_then(|d| d.summary)
                .map(|s| s.overall_usage_percent),
        }
    }
}

/// Score a snapshot.
///
/// Starts at 100 and applies every matching deduction. CPU, memory and disk
/// each have a critical band (bottleneck plus recommendation) and a warning
/// band (recommendation only); load per core has a critical band only.
pub fn analyze(input: &AnalysisInput, thresholds: &AnalysisThresholds) -> AnalysisResult {
    let mut score = PERFECT_SCORE;
    let mut bottlenecks = Vec::new();
    let mut recommendations = Vec::new();

    if let Some(cpu) = input.cpu_usage_percent {
        if cpu > thresholds.cpu_critical {
            bottlenecks.push("High CPU usage detected".to_string());
            recommendations
                .push("Consider closing unnecessary applications or upgrading CPU".to_string());
            score -= 25;
        } else if cpu > thresholds.cpu_warning {
            recommendations.push("Monitor CPU-intensive processes".to_string());
            score -= 10;
        }
    }

    if let (Some(load), Some(cores)) = (input.load_one_minute, input.cores) {
        if cores > 0 && load / f64::from(cores) > thresholds.load_per_core {
            bottlenecks.push("System load exceeds available CPU cores".to_string());
            recommendations.push("Reduce concurrent processes or upgrade hardware".to_string());
            score -= 20;
        }
    }

    if let Some(memory) = input.memory_used_percent {
        if memory > thresholds.memory_critical {
            bottlenecks.push("High memory usage detected".to_string());
            recommendations
                .push("Close memory-intensive applications or add more RAM".to_string());
            score -= 20;
        } else if memory > thresholds.memory_warning {
            recommendations.push("Monitor memory usage and consider upgrading RAM".to_string());
            score -= 5;
        }
    }

    if let Some(disk) = input.disk_used_percent {
        if disk > thresholds.disk_critical {
            bottlenecks.push("Disk space critically low".to_string());
            recommendations.push("Free up disk space immediately".to_string());
            score -= 30;
        } else if disk > thresholds.disk_warning {
            recommendations.push("Consider cleaning up files or upgrading storage".to_string());
            score -= 10;
        }
    }

    if recommendations.is_empty() {
        recommendations.push("System performance appears optimal".to_string());
    }

    let score = score.clamp(0, PERFECT_SCORE);

    AnalysisResult {
        status: PerformanceStatus::from_score(score),
        bottlenecks,
        recommendations,
        performance_score: u8::try_from(score).unwrap_or(0),
    }
}
