//! Per-process resource listings.
//!
//! Runs `ps`/`lsof`, parses their tables into [`ProcessRecord`]s and sorts
//! and pages the result.

pub mod parser;
pub mod sorting;
pub mod types;

pub use parser::{
    parse_cpu_processes, parse_memory_processes, parse_network_processes, split_columns,
};
pub use sorting::{paginate, sort_processes, Page, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use types::{Category, ProcessRecord, SortField, SortOrder, AUTO_SORT};

use crate::error::Result;
use crate::platform::command::CommandRunner;

/// Process table sorted by CPU usage, hottest first
const CPU_LISTING: [&str; 3] = ["-eo", "pid,%cpu,comm", "-r"];
/// Process table sorted by memory usage, largest first
const MEMORY_LISTING: [&str; 3] = ["-eo", "pid,pmem,rss,comm", "-m"];
/// Every open internet socket, numeric hosts and ports
const NETWORK_LISTING: [&str; 3] = ["-i", "-n", "-P"];

/// Fetch the process list for `category`.
///
/// With a `limit` only the first `limit` records are kept; the source
/// commands already emit the busiest processes first. Without a limit the
/// whole table comes back and network records carry their PID.
pub fn list_processes<R: CommandRunner + ?Sized>(
    runner: &R,
    category: Category,
    limit: Option<usize>,
) -> Result<Vec<ProcessRecord>> {
    let mut records = match category {
        Category::Cpu => parse_cpu_processes(&runner.run("ps", &CPU_LISTING)?),
        Category::Memory => parse_memory_processes(&runner.run("ps", &MEMORY_LISTING)?),
        Category::Network => {
            parse_network_processes(&runner.run("lsof", &NETWORK_LISTING)?, limit.is_none())
        }
    };

    if let Some(limit) = limit {
        records.truncate(limit);
    }

    Ok(records)
}
