use resmon::core::{Config, ResourceMonitor};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("resmon").join("config.json");

    let mut config = Config::default();
    config.set_value("command_timeout_secs", "3").unwrap();
    config.set_value("top_processes", "8").unwrap();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.command_timeout(), Duration::from_secs(3));
}

#[test]
fn test_config_file_is_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    Config::default().save_to(&path).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["command_timeout_secs"], 10);
    assert_eq!(raw["default_page_size"], 10);
}

#[test]
fn test_empty_config_file_gives_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_monitor_uses_configured_timeout() {
    let config = Config {
        command_timeout_secs: 2,
        ..Default::default()
    };
    let monitor = ResourceMonitor::from_config(config);

    assert_eq!(monitor.runner().timeout(), Duration::from_secs(2));
    assert_eq!(monitor.config().command_timeout_secs, 2);
}

#[test]
fn test_configured_default_page_size() {
    use resmon::core::CategoryQuery;
    use resmon::platform::CannedRunner;

    let runner = CannedRunner::new().with_output("ps -eo pid,%cpu,comm -r", super::fixtures::PS_CPU);
    let config = Config {
        default_page_size: 3,
        ..Default::default()
    };

    let response = ResourceMonitor::new(runner, config)
        .processes_by_category(&CategoryQuery::new("cpu").page(1, 0));
    let page = response.value().unwrap();

    assert_eq!(page.pagination.page_size, 3);
    assert_eq!(page.processes.len(), 3);
}
