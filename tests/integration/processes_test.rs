use resmon::core::CategoryQuery;
use resmon::platform::CannedRunner;
use serde_json::{json, Value};

use super::fixtures::{monitor, process_runner, PS_CPU};

fn pids(response: &Value) -> Vec<Value> {
    response["processes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["pid"].clone())
        .collect()
}

fn query(monitor_query: CategoryQuery) -> Value {
    let response = monitor(process_runner()).processes_by_category(&monitor_query);
    serde_json::to_value(&response).unwrap()
}

#[test]
fn test_intensive_summary_shape() {
    let summary = monitor(process_runner()).resource_intensive_processes();
    let json = serde_json::to_value(&summary).unwrap();

    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(
        keys,
        vec![
            "cpu_intensive_processes",
            "memory_intensive_processes",
            "network_intensive_processes"
        ]
    );

    // The malformed ps line is dropped without losing its neighbours
    let cpu = json["cpu_intensive_processes"].as_array().unwrap();
    assert_eq!(cpu.len(), 4);
    assert_eq!(
        cpu[0],
        json!({
            "pid": 812,
            "command": "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "cpu_percent": 45.0
        })
    );

    let memory = json["memory_intensive_processes"].as_array().unwrap();
    assert_eq!(memory[1]["resident_memory_kb"], json!(512000));
    assert!(memory[1].get("cpu_percent").is_none());

    // Top-N network records carry no PID
    assert_eq!(
        json["network_intensive_processes"],
        json!([
            {"command": "Google", "network_connections": 3},
            {"command": "Slack", "network_connections": 2},
            {"command": "rapportd", "network_connections": 1}
        ])
    );
}

#[test]
fn test_intensive_summary_is_capped() {
    let config = resmon::Config {
        top_processes: 2,
        ..Default::default()
    };
    let summary = resmon::ResourceMonitor::new(process_runner(), config).resource_intensive_processes();

    assert_eq!(summary.cpu_intensive_processes.value().map(Vec::len), Some(2));
    assert_eq!(summary.memory_intensive_processes.value().map(Vec::len), Some(2));
    assert_eq!(summary.network_intensive_processes.value().map(Vec::len), Some(2));
}

#[test]
fn test_intensive_summary_isolates_timeouts() {
    let runner = CannedRunner::new()
        .with_output("ps -eo pid,%cpu,comm -r", PS_CPU)
        .with_timeout("lsof -i -n -P");
    let json = serde_json::to_value(monitor(runner).resource_intensive_processes()).unwrap();

    assert_eq!(json["cpu_intensive_processes"].as_array().unwrap().len(), 4);
    assert_eq!(
        json["network_intensive_processes"],
        json!({"error": "Network monitoring failed: 'lsof' timed out after 10s"})
    );
    assert!(json["memory_intensive_processes"]["error"]
        .as_str()
        .unwrap()
        .starts_with("Memory monitoring failed: "));
}

#[test]
fn test_memory_sorted_by_rss_ascending() {
    let json = query(
        CategoryQuery::new("memory")
            .page(1, 2)
            .sorted_by("resident_memory_kb", "asc"),
    );

    assert_eq!(json["process_type"], "memory");
    assert_eq!(pids(&json), vec![json!(300), json!(77)]);
    assert_eq!(
        json["sorting"],
        json!({
            "sort_by": "resident_memory_kb",
            "sort_order": "asc",
            "requested_sort_by": "resident_memory_kb"
        })
    );
    assert_eq!(
        json["pagination"],
        json!({
            "current_page": 1,
            "page_size": 2,
            "total_processes": 4,
            "total_pages": 2,
            "has_next_page": true,
            "has_previous_page": false
        })
    );
}

#[test]
fn test_auto_sort_resolves_to_category_metric() {
    let json = query(CategoryQuery::new("Network"));

    assert_eq!(json["sorting"]["sort_by"], "network_connections");
    assert_eq!(json["sorting"]["requested_sort_by"], "auto");
    assert_eq!(json["sorting"]["sort_order"], "desc");

    // The full listing carries the first PID seen per command
    assert_eq!(
        json["processes"][0],
        json!({"pid": 812, "command": "Google", "network_connections": 3})
    );
}

#[test]
fn test_command_sort_is_case_insensitive() {
    let json = query(CategoryQuery::new("cpu").sorted_by("command", "asc"));
    assert_eq!(pids(&json), vec![json!(812), json!(1), json!(77), json!(300)]);
}

#[test]
fn test_desc_and_asc_are_reversed() {
    let desc = query(CategoryQuery::new("cpu").sorted_by("pid", "desc"));
    let asc = query(CategoryQuery::new("cpu").sorted_by("pid", "asc"));

    let mut reversed = pids(&asc);
    reversed.reverse();
    assert_eq!(pids(&desc), reversed);
}

#[test]
fn test_unknown_sort_order_means_desc() {
    let json = query(CategoryQuery::new("cpu").sorted_by("cpu_percent", "sideways"));
    assert_eq!(json["sorting"]["sort_order"], "desc");
    assert_eq!(pids(&json)[0], json!(812));
}

#[test]
fn test_page_arguments_are_clamped() {
    let json = query(CategoryQuery::new("cpu").page(0, 500));
    assert_eq!(json["pagination"]["current_page"], 1);
    assert_eq!(json["pagination"]["page_size"], 100);

    let json = query(CategoryQuery::new("cpu").page(-3, 0));
    assert_eq!(json["pagination"]["current_page"], 1);
    assert_eq!(json["pagination"]["page_size"], 10);
}

#[test]
fn test_page_past_the_end_is_empty() {
    let json = query(CategoryQuery::new("cpu").page(5, 2));

    assert!(json["processes"].as_array().unwrap().is_empty());
    assert_eq!(json["pagination"]["total_pages"], 2);
    assert_eq!(json["pagination"]["has_next_page"], false);
    assert_eq!(json["pagination"]["has_previous_page"], true);
}

#[test]
fn test_invalid_sort_names_valid_options() {
    let json = query(CategoryQuery::new("network").sorted_by("cpu_percent", "desc"));
    assert_eq!(
        json,
        json!({
            "error": "Invalid sort_by 'cpu_percent' for network processes. \
                      Valid options: auto, network_connections, pid, command"
        })
    );
}

#[test]
fn test_invalid_process_type() {
    let json = query(CategoryQuery::new("disk"));
    assert_eq!(
        json,
        json!({"error": "Invalid process_type 'disk'. Must be one of: cpu, memory, network"})
    );
}

#[test]
fn test_requested_sort_by_is_echoed_lowercase() {
    let json = query(CategoryQuery::new("cpu").sorted_by(" PID ", "ASC"));
    assert_eq!(json["sorting"]["sort_by"], "pid");
    assert_eq!(json["sorting"]["requested_sort_by"], "pid");
    assert_eq!(json["sorting"]["sort_order"], "asc");

    let json = query(CategoryQuery::new("cpu").sorted_by("Memory_Percent", "desc"));
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid sort_by 'memory_percent' for cpu processes."));
}
