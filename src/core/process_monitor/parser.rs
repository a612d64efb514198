//! Parsers for process-table output.
//!
//! All functions here are pure: text in, records out. A line that does not
//! have the expected shape is dropped (and logged at debug level); nothing in
//! this module fails.

use std::collections::HashMap;

use log::debug;

use super::types::ProcessRecord;

/// `lsof -i -n -P` prints COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME
const LSOF_MIN_COLUMNS: usize = 9;

/// Split `line` on whitespace into at most `max_parts` tokens.
///
/// The last token is the unsplit remainder of the line, so a command name
/// with embedded spaces stays in one piece.
pub fn split_columns(line: &str, max_parts: usize) -> Vec<&str> {
    let mut parts = Vec::with_capacity(max_parts.min(16));
    let mut rest = line.trim();

    while !rest.is_empty() {
        if parts.len() + 1 == max_parts {
            parts.push(rest);
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                parts.push(&rest[..end]);
                rest = rest[end..].trim_start();
            }
            None => {
                parts.push(rest);
                break;
            }
        }
    }

    parts
}

/// Data lines of a tabular listing: header dropped, blank lines skipped
fn data_lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().skip(1).filter(|line| !line.trim().is_empty())
}

fn parse_percent(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Parse `ps -eo pid,%cpu,comm` output
pub fn parse_cpu_processes(output: &str) -> Vec<ProcessRecord> {
    data_lines(output).filter_map(parse_cpu_line).collect()
}

fn parse_cpu_line(line: &str) -> Option<ProcessRecord> {
    match split_columns(line, 3).as_slice() {
        [pid, cpu, command] => match (pid.parse::<u32>(), parse_percent(cpu)) {
            (Ok(pid), Some(cpu)) => Some(ProcessRecord::cpu(pid, cpu, *command)),
            _ => {
                debug!("Dropping process line with bad numbers: {:?}", line);
                None
            }
        },
        _ => {
            debug!("Dropping truncated process line: {:?}", line);
            None
        }
    }
}

/// Parse `ps -eo pid,pmem,rss,comm` output
pub fn parse_memory_processes(output: &str) -> Vec<ProcessRecord> {
    data_lines(output).filter_map(parse_memory_line).collect()
}

fn parse_memory_line(line: &str) -> Option<ProcessRecord> {
    match split_columns(line, 4).as_slice() {
        [pid, pmem, rss, command] => {
            match (pid.parse::<u32>(), parse_percent(pmem), rss.parse::<u64>()) {
                (Ok(pid), Some(pmem), Ok(rss)) => {
                    Some(ProcessRecord::memory(pid, pmem, rss, *command))
                }
                _ => {
                    debug!("Dropping process line with bad numbers: {:?}", line);
                    None
                }
            }
        }
        _ => {
            debug!("Dropping truncated process line: {:?}", line);
            None
        }
    }
}

/// Tally open network files per command from `lsof -i -n -P` output.
///
/// Each qualifying line counts as one connection for its command. Records come
/// back busiest first, ties in first-seen order. With `include_pid` each record
/// carries the first PID seen for that command; several processes sharing a
/// command name are folded together.
pub fn parse_network_processes(output: &str, include_pid: bool) -> Vec<ProcessRecord> {
    let mut tally: Vec<(String, Option<u32>, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for line in data_lines(output) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < LSOF_MIN_COLUMNS {
            debug!("Dropping short lsof line: {:?}", line);
            continue;
        }

        let command = tokens[0];
        match index.get(command) {
            Some(&slot) => tally[slot].2 += 1,
            None => {
                index.insert(command.to_string(), tally.len());
                tally.push((command.to_string(), tokens[1].parse().ok(), 1));
            }
        }
    }

    tally.sort_by(|a, b| b.2.cmp(&a.2));

    tally
        .into_iter()
        .map(|(command, pid, count)| {
            ProcessRecord::network(if include_pid { pid } else { None }, command, count)
        })
        .collect()
}
