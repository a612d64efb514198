use resmon::core::{call_tool, handle_line, list_tools, serve};
use std::io::Cursor;
use serde_json::{json, Value};

use super::fixtures::{full_runner, monitor, process_runner};

fn respond(line: &str) -> Value {
    serde_json::to_value(handle_line(&monitor(process_runner()), line)).unwrap()
}

#[test]
fn test_list_tools() {
    let names: Vec<&str> = list_tools().iter().map(|tool| tool.name).collect();
    assert_eq!(
        names,
        vec![
            "get_resource_intensive_processes",
            "get_processes_by_category",
            "get_system_overview"
        ]
    );

    let json = respond(r#"{"id": 1, "tool": "list_tools"}"#);
    assert_eq!(json["id"], 1);
    assert_eq!(json["result"].as_array().unwrap().len(), 3);
    assert!(json["result"][0]["description"].is_string());
}

#[test]
fn test_request_id_is_echoed() {
    let json = respond(r#"{"id": "abc", "tool": "get_resource_intensive_processes"}"#);
    assert_eq!(json["id"], "abc");
    assert_eq!(
        json["result"]["cpu_intensive_processes"][0]["pid"],
        812
    );
    assert!(json.get("error").is_none());
}

#[test]
fn test_category_tool_with_arguments() {
    let json = respond(
        r#"{"tool": "get_processes_by_category",
            "arguments": {"process_type": "memory", "page_size": 1, "sort_by": "pid", "sort_order": "asc"}}"#,
    );

    assert!(json.get("id").is_none());
    assert_eq!(json["result"]["processes"], json!([{
        "pid": 77,
        "command": "/usr/sbin/WindowServer",
        "memory_percent": 1.2,
        "resident_memory_kb": 196000
    }]));
    assert_eq!(json["result"]["pagination"]["total_pages"], 4);
}

#[test]
fn test_validation_errors_stay_in_result() {
    let json = respond(
        r#"{"id": 7, "tool": "get_processes_by_category", "arguments": {"process_type": "gpu"}}"#,
    );
    assert_eq!(
        json["result"],
        json!({"error": "Invalid process_type 'gpu'. Must be one of: cpu, memory, network"})
    );
}

#[test]
fn test_missing_arguments() {
    let json = respond(r#"{"id": 2, "tool": "get_processes_by_category"}"#);
    assert_eq!(json["id"], 2);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid arguments for get_processes_by_category: "));
}

#[test]
fn test_unknown_tool() {
    let json = respond(r#"{"id": 3, "tool": "get_gpu_usage"}"#);
    assert_eq!(
        json,
        json!({
            "id": 3,
            "error": "Unknown tool 'get_gpu_usage'. Available tools: \
                      get_resource_intensive_processes, get_processes_by_category, get_system_overview"
        })
    );
}

#[test]
fn test_malformed_request() {
    let json = respond("{not json");
    assert!(json["error"].as_str().unwrap().starts_with("Malformed request: "));

    let json = respond(r#"{"id": 4}"#);
    assert!(json["error"].as_str().unwrap().contains("tool"));
}

#[test]
fn test_call_overview_tool() {
    let result = call_tool(&monitor(full_runner()), "get_system_overview", None).unwrap();
    assert_eq!(result["performance_analysis"]["performance_score"], 55);
    assert_eq!(result["system"]["macos_version"], "14.5");
}

#[test]
fn test_serve_survives_invalid_utf8_line() {
    let mut input = b"{\"id\": 1, \"tool\": \"list_tools\"}\n".to_vec();
    input.extend_from_slice(b"\xff\xfe\n\n");
    input.extend_from_slice(b"{\"id\": 2, \"tool\": \"list_tools\"}");
    let mut output = Vec::new();

    let answered = serve(&monitor(process_runner()), Cursor::new(input), &mut output).unwrap();
    assert_eq!(answered, 3);

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["id"], 1);
    assert!(responses[1]["error"]
        .as_str()
        .unwrap()
        .starts_with("Malformed request: "));
    assert_eq!(responses[2]["id"], 2);
    assert_eq!(responses[2]["result"].as_array().unwrap().len(), 3);
}
