// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! End-to-end bus behavior through the public API

use gavel_core::{
    build_trace, summarize, Bus, LoggingMiddleware, Next, RedactionMiddleware,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[test]
fn schema_gated_publish_with_layered_middleware() {
    let mut bus = Bus::from_document(&json!({
        "events": {
            "x": {
                "type": "object",
                "required": ["value"],
                "properties": {"value": {"type": "integer"}}
            }
        }
    }))
    .unwrap();

    let logged: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&logged);
    bus.use_middleware(LoggingMiddleware::new(move |event, _payload| {
        log.borrow_mut().push(event.to_string());
    }));
    bus.use_middleware(|event: &str, payload: Value, next: &mut Next<'_>| {
        Ok(Some(next.forward(event, payload)?))
    });

    let envelope = bus.publish("x", json!({"value": 3})).unwrap().unwrap();
    assert_eq!(envelope.sequence, 1);
    assert_eq!(envelope.payload, json!({"value": 3}));
    assert!(envelope.redactions.is_empty());

    let err = bus.publish("x", json!({"value": "bad"})).unwrap_err();
    assert!(err.to_string().contains("failed validation"));
    assert_eq!(bus.envelopes().len(), 1);
    assert_eq!(*logged.borrow(), vec!["x", "x"]);
}

#[test]
fn redacted_run_exports_a_consistent_trace() {
    let mut bus = Bus::from_document(&json!({
        "events": {
            "session.prompt": {"type": "object"},
            "session.finished": {
                "type": "object",
                "required": ["summary", "turns"]
            }
        }
    }))
    .unwrap();

    let mut rules = HashMap::new();
    rules.insert(
        "session.prompt".to_string(),
        vec!["message.metadata.secret".to_string()],
    );
    bus.use_middleware(RedactionMiddleware::new(rules));

    bus.publish(
        "session.prompt",
        json!({"message": {"metadata": {"secret": "token"}}}),
    )
    .unwrap();
    bus.publish("session.finished", json!({"summary": "done", "turns": 2}))
        .unwrap();

    let summary = summarize(bus.envelopes());
    assert_eq!(summary.total_events, 2);
    assert_eq!(summary.redaction_counts["message.metadata.secret"], 1);

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("trace.json");
    gavel_core::write_trace(bus.envelopes(), &target).unwrap();

    let text = std::fs::read_to_string(&target).unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed[0]["event"], "session.prompt");
    assert_eq!(
        parsed[0]["payload"]["message"]["metadata"]["secret"],
        "***REDACTED***"
    );
    assert_eq!(parsed[0]["redactions"], json!(["message.metadata.secret"]));
    assert_eq!(parsed[1]["sequence"], 2);
    assert_eq!(parsed, serde_json::to_value(build_trace(bus.envelopes())).unwrap());
}
