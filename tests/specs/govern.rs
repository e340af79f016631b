//! Governance specs

use crate::prelude::*;

#[test]
fn govern_reports_decisions_and_approval() {
    let temp = Project::empty();
    let scenario = temp.file("scenario.toml", GOVERN_SCENARIO);

    temp.gavel()
        .arg("govern")
        .arg(&scenario)
        .assert()
        .success()
        .stdout(contains("max_drawdown: FAIL"))
        .stdout(contains("min_return: PASS"))
        .stdout(contains("approved: false"));
}

#[test]
fn govern_approves_within_thresholds() {
    let temp = Project::empty();
    let scenario = temp.file(
        "scenario.toml",
        r#"
[policies]
max_drawdown = 1.5
min_return = 0.0

[input]
subject = "trade"
score = 0.4

[input.metadata]
max_drawdown = 0.5
"#,
    );

    temp.gavel()
        .arg("govern")
        .arg(&scenario)
        .assert()
        .success()
        .stdout(contains("max_drawdown: PASS"))
        .stdout(contains("approved: true"));
}

#[test]
fn govern_writes_the_audit_trace() {
    let temp = Project::empty();
    let scenario = temp.file("scenario.toml", GOVERN_SCENARIO);
    let trace = temp.path().join("audit.json");

    temp.gavel()
        .arg("govern")
        .arg(&scenario)
        .arg("--trace")
        .arg(&trace)
        .assert()
        .success();

    let text = std::fs::read_to_string(&trace).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed[0]["event"], "governor.evaluated");
    assert_eq!(parsed[0]["payload"]["approved"], false);
}

#[test]
fn govern_without_input_section_fails() {
    let temp = Project::empty();
    let scenario = temp.file("scenario.toml", "[policies]\nmin_return = 0.0\n");

    temp.gavel()
        .arg("govern")
        .arg(&scenario)
        .assert()
        .failure()
        .stderr(contains("no [input] section"));
}
