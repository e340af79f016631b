//! Schema listing specs

use crate::prelude::*;

#[test]
fn schema_lists_registered_events_sorted() {
    let temp = Project::empty();
    let scenario = temp.file(
        "scenario.toml",
        r#"
[events."b.two"]
type = "object"

[events."a.one"]
type = "object"
"#,
    );

    temp.gavel()
        .arg("schema")
        .arg(&scenario)
        .assert()
        .success()
        .stdout(contains("a.one\nb.two\n"));
}

#[test]
fn empty_scenario_lists_nothing() {
    let temp = Project::empty();
    let scenario = temp.file("scenario.toml", "");

    temp.gavel()
        .arg("schema")
        .arg(&scenario)
        .assert()
        .success()
        .stdout(predicates::str::is_empty());
}
