//! Full run against configuration and state files on disk

use e2e_tests::*;
use message_sink::test_utils::CollectorSink;
use mtf_signals::SignalRunner;
use serde_json::Value;
use state_store::JsonFileStateStore;
use tempfile::tempdir;

#[tokio::test]
async fn run_writes_state_file_in_persisted_shape() {
    let dir = tempdir().unwrap();
    let runner_path = write_config_files(dir.path(), &scenario_settings(&["ABCUSDT"])).unwrap();
    std::fs::write(
        dir.path().join("state.json"),
        r#"{"last_signals": [], "note": "kept"}"#,
    )
    .unwrap();

    let settings = config::Settings::load(Some(&runner_path)).unwrap();
    let store = JsonFileStateStore::new(settings.runner.paths.state.clone());
    let source = source_with(&[("ABCUSDT", uptrend(HISTORY), uptrend(HISTORY))]);
    let runner = SignalRunner::new(settings, source, CollectorSink::new(), store);

    let report = runner.run().await.unwrap();
    assert!(report.state_written);

    let contents = std::fs::read_to_string(dir.path().join("state.json")).unwrap();
    let state: Value = serde_json::from_str(&contents).unwrap();

    assert_eq!(state["note"], "kept");
    let signal = &state["last_signals"][0];
    assert_eq!(signal["pair"], "ABCUSDT");
    assert_eq!(signal["dir"], "BUY");
    assert!((signal["conf"].as_f64().unwrap() - 0.85).abs() < 1e-9);
    assert_eq!(signal["meta"]["s5"]["dir"], "BUY");
    assert!(signal["meta"]["s15"]["last"]["emaFast"].is_number());
    assert!(signal["meta"]["s15"]["last"]["bbMid"].is_number());
}

#[tokio::test]
async fn malformed_state_file_fails_before_fetching() {
    let dir = tempdir().unwrap();
    let runner_path = write_config_files(dir.path(), &scenario_settings(&["ABCUSDT"])).unwrap();
    std::fs::write(dir.path().join("state.json"), "[not a record").unwrap();

    let settings = config::Settings::load(Some(&runner_path)).unwrap();
    let store = JsonFileStateStore::new(settings.runner.paths.state.clone());
    let source = source_with(&[("ABCUSDT", uptrend(HISTORY), uptrend(HISTORY))]);
    let runner = SignalRunner::new(settings, source, CollectorSink::new(), store);

    assert!(runner.run().await.is_err());
    assert_eq!(runner.source().call_count(), 0);
    assert_eq!(runner.sink().message_count(), 0);
}

#[test]
fn missing_weight_field_is_fatal_at_load() {
    let dir = tempdir().unwrap();
    let runner_path = write_config_files(dir.path(), &scenario_settings(&["ABCUSDT"])).unwrap();
    std::fs::write(
        dir.path().join("weights.json"),
        r#"{"indicators":{"EMA":0.4,"RSI":0.3}}"#,
    )
    .unwrap();

    assert!(config::Settings::load(Some(&runner_path)).is_err());
}
