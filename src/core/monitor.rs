//! The three public queries.
//!
//! [`ResourceMonitor`] holds no state between calls apart from its settings;
//! every query polls the system again through its [`CommandRunner`].

use chrono::{Local, SecondsFormat};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::config::Config;
use crate::core::fault::{attempt, Outcome};
use crate::core::process_monitor::{
    list_processes, paginate, sort_processes, Category, PageRequest, ProcessRecord, SortField,
    SortOrder, AUTO_SORT, DEFAULT_PAGE_SIZE,
};
use crate::core::system_overview::{
    self, analyze, AnalysisInput, AnalysisResult, AnalysisThresholds, CpuSnapshot, DiskSnapshot,
    MemorySnapshot, NetworkSnapshot, SystemSnapshot,
};
use crate::error::{ResmonError, Result};
use crate::platform::command::{CommandRunner, SystemCommandRunner};

/// Busiest processes per category
#[derive(Debug, Clone, Serialize)]
pub struct IntensiveProcesses {
    pub cpu_intensive_processes: Outcome<Vec<ProcessRecord>>,
    pub memory_intensive_processes: Outcome<Vec<ProcessRecord>>,
    pub network_intensive_processes: Outcome<Vec<ProcessRecord>>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE as i64
}

fn default_sort_by() -> String {
    AUTO_SORT.to_string()
}

fn default_sort_order() -> String {
    SortOrder::Desc.as_str().to_string()
}

/// Arguments of a paginated category query, as a caller sends them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryQuery {
    pub process_type: String,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
}

impl CategoryQuery {
    pub fn new(process_type: impl Into<String>) -> Self {
        Self {
            process_type: process_type.into(),
            page: default_page(),
            page_size: default_page_size(),
            sort_by: default_sort_by(),
            sort_order: default_sort_order(),
        }
    }

    pub fn page(mut self, page: i64, page_size: i64) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    pub fn sorted_by(mut self, sort_by: impl Into<String>, sort_order: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self.sort_order = sort_order.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortingInfo {
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub requested_sort_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationInfo {
    pub current_page: usize,
    pub page_size: usize,
    pub total_processes: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPage {
    pub process_type: Category,
    pub processes: Vec<ProcessRecord>,
    pub sorting: SortingInfo,
    pub pagination: PaginationInfo,
}

/// A page of processes, or `{"error": ...}` when the query was rejected or
/// the listing could not be read
pub type CategoryResponse = Outcome<CategoryPage>;

/// Point-in-time health report
#[derive(Debug, Clone, Serialize)]
pub struct SystemOverview {
    pub timestamp: String,
    pub cpu: Outcome<CpuSnapshot>,
    pub memory: Outcome<MemorySnapshot>,
    pub disk: Outcome<DiskSnapshot>,
    pub network: Outcome<NetworkSnapshot>,
    pub system: Outcome<SystemSnapshot>,
    pub performance_analysis: AnalysisResult,
}

pub struct ResourceMonitor<R: CommandRunner = SystemCommandRunner> {
    runner: R,
    config: Config,
}

impl ResourceMonitor<SystemCommandRunner> {
    /// Monitor backed by the real system tools, with the configured timeout
    pub fn from_config(config: Config) -> Self {
        let runner = SystemCommandRunner::with_timeout(config.command_timeout());
        Self::new(runner, config)
    }
}

impl<R: CommandRunner> ResourceMonitor<R> {
    pub fn new(runner: R, config: Config) -> Self {
        Self { runner, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Top CPU, memory and network consumers. A failing category reports its
    /// error without affecting the other two.
    pub fn resource_intensive_processes(&self) -> IntensiveProcesses {
        let top = Some(self.config.top_processes);
        let runner = &self.runner;

        IntensiveProcesses {
            cpu_intensive_processes: attempt("CPU monitoring failed", || {
                list_processes(runner, Category::Cpu, top)
            }),
            memory_intensive_processes: attempt("Memory monitoring failed", || {
                list_processes(runner, Category::Memory, top)
            }),
            network_intensive_processes: attempt("Network monitoring failed", || {
                list_processes(runner, Category::Network, top)
            }),
        }
    }

    /// One sorted page of a category's full process list.
    pub fn processes_by_category(&self, query: &CategoryQuery) -> CategoryResponse {
        let category: Category = match query.process_type.parse() {
            Ok(category) => category,
            Err(e) => return Outcome::failed(validation_message(e)),
        };

        let sort_field = match resolve_sort_field(category, &query.sort_by) {
            Ok(field) => field,
            Err(e) => return Outcome::failed(validation_message(e)),
        };
        let sort_order = SortOrder::parse_or_default(&query.sort_order);
        let request = PageRequest::new(query.page, query.page_size, self.config.default_page_size);

        debug!(
            "Listing {} processes by {} {}, page {} of size {}",
            category,
            sort_field,
            sort_order.as_str(),
            request.page,
            request.page_size
        );

        let processes = match list_processes(&self.runner, category, None) {
            Ok(processes) => processes,
            Err(e) => {
                return Outcome::failed(format!("Error retrieving {} processes: {}", category, e))
            }
        };

        let page = paginate(sort_processes(processes, sort_field, sort_order), request);

        Outcome::Ok(CategoryPage {
            process_type: category,
            processes: page.items,
            sorting: SortingInfo {
                sort_by: sort_field,
                sort_order,
                requested_sort_by: normalize_sort_name(&query.sort_by),
            },
            pagination: PaginationInfo {
                current_page: page.current_page,
                page_size: page.page_size,
                total_processes: page.total_items,
                total_pages: page.total_pages,
                has_next_page: page.has_next,
                has_previous_page: page.has_previous,
            },
        })
    }

    /// CPU, memory, disk, network and host snapshots plus a health analysis
    /// computed from the same snapshots.
    pub fn system_overview(&self) -> SystemOverview {
        let runner = &self.runner;

        let cpu = attempt("CPU overview failed", || system_overview::cpu::collect(runner));
        let memory = attempt("Memory overview failed", || {
            system_overview::memory::collect(runner)
        });
        let disk = attempt("Disk overview failed", || system_overview::disk::collect(runner));
        let network = attempt("Network overview failed", || {
            system_overview::network::collect(runner, self.config.network_overview_processes)
        });
        let system = attempt("System info failed", || system_overview::system::collect(runner));

        let input = AnalysisInput::from_snapshots(cpu.value(), memory.value(), disk.value());
        let performance_analysis = analyze(&input, &AnalysisThresholds::default());

        SystemOverview {
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
            cpu,
            memory,
            disk,
            network,
            system,
            performance_analysis,
        }
    }
}

fn normalize_sort_name(sort_by: &str) -> String {
    sort_by.trim().to_lowercase()
}

/// Map a `sort_by` value onto a field the category supports. Names are
/// matched case-insensitively.
pub fn resolve_sort_field(category: Category, sort_by: &str) -> Result<SortField> {
    let sort_by = normalize_sort_name(sort_by);
    if sort_by == AUTO_SORT {
        return Ok(category.default_sort_field());
    }

    SortField::from_name(&sort_by)
        .filter(|field| category.supports(*field))
        .ok_or_else(|| {
            ResmonError::invalid_argument(format!(
                "Invalid sort_by '{}' for {} processes. Valid options: {}",
                sort_by,
                category,
                category.sort_options().join(", ")
            ))
        })
}

/// Validation errors go back to the caller without the error-kind prefix
fn validation_message(error: ResmonError) -> String {
    match error {
        ResmonError::InvalidArgument(message) => message,
        other => other.to_string(),
    }
}
