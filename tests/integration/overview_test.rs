use chrono::DateTime;
use serde_json::json;

use super::fixtures::{full_runner, monitor, process_runner};

#[test]
fn test_full_overview() {
    let overview = monitor(full_runner()).system_overview();
    let json = serde_json::to_value(&overview).unwrap();

    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(
        keys,
        vec!["timestamp", "cpu", "memory", "disk", "network", "system", "performance_analysis"]
    );
    assert!(DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());

    assert_eq!(json["cpu"]["user_percent"], 70.5);
    assert_eq!(json["cpu"]["total_usage_percent"], 90.5);
    assert_eq!(json["cpu"]["cores"], 8);
    assert_eq!(
        json["cpu"]["load_average"],
        json!({"1min": 12.5, "5min": 10.0, "15min": 9.0})
    );

    assert_eq!(json["memory"]["pages_free"], 10_000 * 4096);
    assert_eq!(json["memory"]["used_percent"], 33.38);
    assert_eq!(json["memory"]["total_physical_memory_gb"], 4.0);

    assert_eq!(json["disk"]["filesystems"].as_array().unwrap().len(), 3);
    assert_eq!(json["disk"]["summary"]["overall_usage_percent"], 42.8);

    assert_eq!(json["network"]["interfaces"]["en0"]["packets_in"], "9876543");
    assert_eq!(
        json["network"]["connections"],
        json!({"tcp_connections": 3, "udp_connections": 1, "total_connections": 4})
    );
    assert_eq!(
        json["network"]["top_network_processes"].as_array().unwrap().len(),
        3
    );

    assert_eq!(json["system"]["uptime"], "3 days");
    assert_eq!(json["system"]["macos_version"], "14.5");
    assert_eq!(json["system"]["logged_in_users"], 2);
    assert_eq!(json["system"]["total_processes"], 4);
}

#[test]
fn test_analysis_uses_same_snapshots() {
    let overview = monitor(full_runner()).system_overview();
    let analysis = serde_json::to_value(&overview.performance_analysis).unwrap();

    // 90.5% CPU (-25) and a 12.5 load on 8 cores (-20)
    assert_eq!(
        analysis,
        json!({
            "status": "fair",
            "bottlenecks": [
                "High CPU usage detected",
                "System load exceeds available CPU cores"
            ],
            "recommendations": [
                "Consider closing unnecessary applications or upgrading CPU",
                "Reduce concurrent processes or upgrade hardware"
            ],
            "performance_score": 55
        })
    );
}

#[test]
fn test_overview_isolates_failed_sections() {
    let overview = monitor(process_runner()).system_overview();
    let json = serde_json::to_value(&overview).unwrap();

    assert_eq!(
        json["cpu"],
        json!({"error": "CPU overview failed: Metric collection failed: no CPU statistics source responded"})
    );
    assert!(json["memory"]["error"]
        .as_str()
        .unwrap()
        .starts_with("Memory overview failed: "));
    assert!(json["disk"]["error"]
        .as_str()
        .unwrap()
        .starts_with("Disk overview failed: "));

    // lsof still answered, so the network section survives without netstat
    assert!(json["network"].get("error").is_none());
    assert!(json["network"].get("connections").is_none());
    assert_eq!(json["network"]["top_network_processes"][0]["command"], "Google");

    assert_eq!(json["system"]["total_processes"], 4);
    assert!(json["system"].get("uptime").is_none());

    // Nothing to judge, nothing to deduct
    assert_eq!(json["performance_analysis"]["performance_score"], 100);
    assert_eq!(json["performance_analysis"]["status"], "excellent");
    assert_eq!(
        json["performance_analysis"]["recommendations"],
        json!(["System performance appears optimal"])
    );
}

#[test]
fn test_uptime_fills_missing_top_load() {
    let runner = process_runner()
        .with_output("top -l 1 -n 0", "CPU usage: 5.0% user, 5.0% sys, 90.0% idle")
        .with_output("uptime", "10:15  up 2:04, 1 user, load averages: 1.50 1.25 1.00")
        .with_output("sysctl -n hw.ncpu", "4");
    let overview = monitor(runner).system_overview();

    let cpu = overview.cpu.value().unwrap();
    assert_eq!(cpu.total_usage_percent, Some(10.0));
    assert_eq!(cpu.load_average.map(|l| l.one), Some(1.5));
    assert_eq!(cpu.cores, Some(4));
}
