use anyhow::{Context, Result};
use clap::ArgMatches;

use super::{load_monitor, print_json};
use crate::core::CategoryQuery;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let process_type = matches
        .get_one::<String>("type")
        .context("Process type argument is required")?;

    let mut query = CategoryQuery::new(process_type.as_str());
    if let Some(page) = matches.get_one::<i64>("page") {
        query.page = *page;
    }
    if let Some(page_size) = matches.get_one::<i64>("page-size") {
        query.page_size = *page_size;
    }
    if let Some(sort_by) = matches.get_one::<String>("sort-by") {
        query.sort_by = sort_by.clone();
    }
    if let Some(sort_order) = matches.get_one::<String>("sort-order") {
        query.sort_order = sort_order.clone();
    }

    let monitor = load_monitor()?;
    print_json(&monitor.processes_by_category(&query))
}
