// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregated view over recorded envelopes

use crate::events::Envelope;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-event and per-redaction-path counts for a sequence of envelopes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusSummary {
    pub total_events: usize,
    pub event_counts: BTreeMap<String, usize>,
    pub redaction_counts: BTreeMap<String, usize>,
}

impl BusSummary {
    /// One-line rendering, e.g. `total=3 | events=(a:2, b:1)`
    pub fn format(&self) -> String {
        let mut parts = vec![format!("total={}", self.total_events)];
        if !self.event_counts.is_empty() {
            let events = self
                .event_counts
                .iter()
                .map(|(name, count)| format!("{name}:{count}"))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("events=({events})"));
        }
        if !self.redaction_counts.is_empty() {
            let redactions = self
                .redaction_counts
                .iter()
                .map(|(path, count)| format!("{path}:{count}"))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("redactions=({redactions})"));
        }
        parts.join(" | ")
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "total_events": self.total_events,
            "event_counts": self.event_counts,
            "redaction_counts": self.redaction_counts,
        })
    }
}

/// Produce a [`BusSummary`] from recorded envelopes
pub fn summarize(envelopes: &[Envelope]) -> BusSummary {
    let mut event_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut redaction_counts: BTreeMap<String, usize> = BTreeMap::new();
    for envelope in envelopes {
        *event_counts.entry(envelope.event.clone()).or_default() += 1;
        for path in &envelope.redactions {
            *redaction_counts.entry(path.clone()).or_default() += 1;
        }
    }
    BusSummary {
        total_events: envelopes.len(),
        event_counts,
        redaction_counts,
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
