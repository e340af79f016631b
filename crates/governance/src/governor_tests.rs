use super::*;
use crate::input::PolicyInput;
use crate::patch::PatchOp;
use crate::policy::FnPolicy;
use serde_json::Map;

fn metadata(entries: &[(&str, Value)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

fn drawdown_cap() -> FnPolicy {
    FnPolicy::new("drawdown_cap", "Caps drawdown", |input: &PolicyInput| {
        let drawdown = input
            .metadata
            .get("max_drawdown")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        if drawdown <= 1.5 {
            Decision::pass("drawdown_cap", "ok")
        } else {
            Decision::fail("drawdown_cap", "too high").with_patches(vec![PatchOp::set(
                vec!["status".into()],
                json!("flagged"),
            )])
        }
    })
}

#[test]
fn enforce_aggregates_decisions_in_registration_order() {
    let mut governor = Governor::new(Bus::new()).unwrap();
    governor.register(FnPolicy::new("return", "Requires positive return", |input| {
        let score = input.score.unwrap_or(0.0);
        Decision::new("return", score > 0.0, if score > 0.0 { "positive" } else { "negative" })
    }));
    governor.register(drawdown_cap());

    let input = PolicyInput::new("test")
        .with_score(0.1)
        .with_metadata(metadata(&[("max_drawdown", json!(2.0))]));
    let verdict = governor.enforce(&input, EnforceOptions::default()).unwrap();

    assert!(!verdict.approved);
    assert_eq!(verdict.decisions.len(), 2);
    assert_eq!(verdict.decisions[0].name, "return");
    assert!(verdict.decisions[0].passed);
    assert!(!verdict.decisions[1].passed);
}

#[test]
fn enforce_applies_patches_to_the_returned_plan() {
    let mut governor = Governor::new(Bus::new()).unwrap();
    governor.register(drawdown_cap());

    let input = PolicyInput::new("trade")
        .with_metadata(metadata(&[("max_drawdown", json!(2.0))]))
        .with_plan(json!({"status": "new"}));
    let verdict = governor
        .enforce(&input, EnforceOptions::applying_patches())
        .unwrap();

    assert!(!verdict.approved);
    assert_eq!(verdict.input.plan["status"], "flagged");
    // The caller's input is untouched.
    assert_eq!(input.plan["status"], "new");
}

#[test]
fn later_policies_observe_earlier_remediations() {
    let mut governor = Governor::new(Bus::new()).unwrap();
    governor.register(FnPolicy::new("marker", "Marks the plan for review", |_input| {
        Decision::fail("marker", "needs review").with_patches(vec![PatchOp::set(
            vec!["status".into()],
            json!("review"),
        )])
    }));
    governor.register(FnPolicy::new("reader", "Reads the plan status", |input| {
        let status = input.plan["status"].as_str().unwrap_or("unset");
        Decision::new("reader", status == "review", format!("status={status}"))
    }));

    let input = PolicyInput::new("plan").with_plan(json!({"status": "new"}));
    let verdict = governor
        .enforce(&input, EnforceOptions::applying_patches())
        .unwrap();

    assert!(verdict.decisions[1].passed);
    assert_eq!(verdict.decisions[1].reason, "status=review");
}

#[test]
fn patches_are_ignored_without_the_option() {
    let mut governor = Governor::new(Bus::new()).unwrap();
    governor.register(drawdown_cap());

    let input = PolicyInput::new("trade")
        .with_metadata(metadata(&[("max_drawdown", json!(2.0))]))
        .with_plan(json!({"status": "new"}));
    let verdict = governor.enforce(&input, EnforceOptions::default()).unwrap();

    assert_eq!(verdict.input.plan["status"], "new");
}

#[test]
fn approval_is_vacuously_true_without_policies() {
    let mut governor = Governor::new(Bus::new()).unwrap();

    let verdict = governor
        .enforce(&PolicyInput::new("empty"), EnforceOptions::default())
        .unwrap();

    assert!(verdict.approved);
    assert!(verdict.decisions.is_empty());
}

#[test]
fn enforcement_records_an_audit_envelope() {
    let mut governor = Governor::new(Bus::new()).unwrap();
    governor.register(drawdown_cap());

    governor
        .enforce(
            &PolicyInput::new("trade")
                .with_metadata(metadata(&[("max_drawdown", json!(2.0))])),
            EnforceOptions::default(),
        )
        .unwrap();

    let envelopes = governor.bus().envelopes();
    assert_eq!(envelopes.len(), 1);
    assert_eq!(envelopes[0].event, AUDIT_EVENT);
    assert_eq!(envelopes[0].payload["approved"], json!(false));
    assert_eq!(envelopes[0].payload["results"][0]["name"], "drawdown_cap");
    assert_eq!(envelopes[0].payload["input"]["subject"], "trade");
}

#[test]
fn evaluate_is_a_pure_read() {
    let mut governor = Governor::new(Bus::new()).unwrap();
    governor.register(drawdown_cap());

    let input = PolicyInput::new("trade").with_plan(json!({"status": "new"}));
    let decisions = governor.evaluate(&input);

    assert_eq!(decisions.len(), 1);
    assert!(governor.bus().envelopes().is_empty());
    assert_eq!(input.plan["status"], "new");
}

#[test]
fn non_object_plan_is_rejected() {
    let mut governor = Governor::new(Bus::new()).unwrap();

    let input = PolicyInput::new("bad").with_plan(json!([1, 2]));
    let err = governor.enforce(&input, EnforceOptions::default()).unwrap_err();

    assert!(matches!(err, GovernanceError::PlanNotObject));
}

#[test]
fn patch_failure_surfaces_and_audits_nothing() {
    let mut governor = Governor::new(Bus::new()).unwrap();
    governor.register(FnPolicy::new("broken", "Emits an invalid patch", |_input| {
        Decision::fail("broken", "bad patch").with_patches(vec![PatchOp::remove(Vec::new())])
    }));

    let err = governor
        .enforce(&PolicyInput::new("x"), EnforceOptions::applying_patches())
        .unwrap_err();

    assert!(matches!(err, GovernanceError::Patch(_)));
    assert!(governor.bus().envelopes().is_empty());
}
