//! Event publishing specs

use crate::prelude::*;

#[test]
fn events_publishes_and_summarizes() {
    let temp = Project::empty();
    let scenario = temp.file("scenario.toml", BASIC_SCENARIO);

    temp.gavel()
        .arg("events")
        .arg(&scenario)
        .assert()
        .success()
        .stdout(contains("trade.turn seq=1 redactions=1"))
        .stdout(contains("total=1 | events=(trade.turn:1)"));
}

#[test]
fn events_writes_a_trace_file() {
    let temp = Project::empty();
    let scenario = temp.file("scenario.toml", BASIC_SCENARIO);
    let trace = temp.path().join("trace.json");

    temp.gavel()
        .arg("events")
        .arg(&scenario)
        .arg("--trace")
        .arg(&trace)
        .assert()
        .success()
        .stdout(contains("trace written to"));

    let text = std::fs::read_to_string(&trace).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed[0]["event"], "trade.turn");
    assert_eq!(parsed[0]["payload"]["secret"], "***REDACTED***");
    assert_eq!(parsed[0]["timestamp"], "2024-01-01T00:00:00.001000+00:00");
}

#[test]
fn invalid_payload_fails_the_run() {
    let temp = Project::empty();
    let scenario = temp.file(
        "scenario.toml",
        r#"
[events."trade.turn"]
type = "object"
required = ["value"]

[[publish]]
event = "trade.turn"

[publish.payload]
other = 1
"#,
    );

    temp.gavel()
        .arg("events")
        .arg(&scenario)
        .assert()
        .failure()
        .stderr(contains("failed validation"));
}

#[test]
fn unknown_event_fails_the_run() {
    let temp = Project::empty();
    let scenario = temp.file(
        "scenario.toml",
        r#"
[[publish]]
event = "trade.unheard"

[publish.payload]
value = 1
"#,
    );

    temp.gavel()
        .arg("events")
        .arg(&scenario)
        .assert()
        .failure()
        .stderr(contains("unknown event"));
}

#[test]
fn missing_scenario_file_reports_the_path() {
    let temp = Project::empty();

    temp.gavel()
        .arg("events")
        .arg("nope.toml")
        .assert()
        .failure()
        .stderr(contains("failed to read scenario"));
}
