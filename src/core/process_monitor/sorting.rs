//! Ordering and paging of process lists.

use std::cmp::Ordering;

use super::types::{ProcessRecord, SortField, SortOrder};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Sort `processes` by `field`.
///
/// The sort is stable in both directions: records that compare equal keep
/// their input order. A missing PID sorts below every real one, a missing
/// metric counts as zero.
pub fn sort_processes(
    mut processes: Vec<ProcessRecord>,
    field: SortField,
    order: SortOrder,
) -> Vec<ProcessRecord> {
    processes.sort_by(|a, b| {
        let ordering = compare_by(a, b, field);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    processes
}

fn compare_by(a: &ProcessRecord, b: &ProcessRecord, field: SortField) -> Ordering {
    match field {
        SortField::Pid => a.pid.cmp(&b.pid),
        SortField::Command => a.command.to_lowercase().cmp(&b.command.to_lowercase()),
        SortField::CpuPercent => compare_metric(a.cpu_percent, b.cpu_percent),
        SortField::MemoryPercent => compare_metric(a.memory_percent, b.memory_percent),
        SortField::ResidentMemoryKb => a
            .resident_memory_kb
            .unwrap_or(0)
            .cmp(&b.resident_memory_kb.unwrap_or(0)),
        SortField::NetworkConnections => a
            .network_connections
            .unwrap_or(0)
            .cmp(&b.network_connections.unwrap_or(0)),
    }
}

fn compare_metric(a: Option<f64>, b: Option<f64>) -> Ordering {
    a.unwrap_or(0.0)
        .partial_cmp(&b.unwrap_or(0.0))
        .unwrap_or(Ordering::Equal)
}

/// A page position with both values already clamped to their valid ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    /// Clamp caller input: `page < 1` becomes 1, `page_size < 1` becomes the
    /// default and anything above [`MAX_PAGE_SIZE`] is capped.
    pub fn new(page: i64, page_size: i64, default_page_size: usize) -> Self {
        let page = usize::try_from(page.max(1)).unwrap_or(1);
        let page_size = if page_size < 1 {
            default_page_size.clamp(1, MAX_PAGE_SIZE)
        } else {
            usize::try_from(page_size)
                .unwrap_or(MAX_PAGE_SIZE)
                .min(MAX_PAGE_SIZE)
        };
        Self { page, page_size }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One slice of a larger list plus where it sits in that list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Slice one page out of `items`. A hand-built request with zeroes is read as
/// page 1 of size 1.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let page = request.page.max(1);
    let page_size = request.page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    let items = items.into_iter().skip(start).take(end - start).collect();

    Page {
        items,
        current_page: page,
        page_size,
        total_items,
        total_pages,
        has_next: page < total_pages,
        has_previous: page > 1,
    }
}
