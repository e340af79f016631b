// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Envelopes: immutable, sequenced records of delivered events

use crate::clock::DeterministicClock;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Record of one successfully validated and delivered event.
///
/// Envelopes are created exactly once per successful publish and never
/// mutated afterwards; the store keeps its own copy and callers receive
/// owned clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Monotonic sequence number, starting at 1 with no gaps
    pub sequence: u64,
    /// The event name
    pub event: String,
    /// Deterministic delivery timestamp
    pub timestamp: DateTime<Utc>,
    /// Snapshot of the delivered payload
    pub payload: Value,
    /// Dotted paths masked before delivery, in application order
    pub redactions: Vec<String>,
}

impl Envelope {
    /// Render the export shape consumed by downstream trace tooling
    pub fn to_json(&self) -> Value {
        json!({
            "sequence": self.sequence,
            "event": self.event,
            "timestamp": self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, false),
            "payload": self.payload,
            "redactions": self.redactions,
        })
    }
}

/// Append-only, strictly ordered log of delivered events
#[derive(Debug, Default)]
pub struct EnvelopeStore {
    envelopes: Vec<Envelope>,
    sequence: u64,
}

impl EnvelopeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next envelope and return the caller's copy
    pub fn append(
        &mut self,
        event: &str,
        payload: Value,
        redactions: Vec<String>,
        clock: &DeterministicClock,
    ) -> Envelope {
        self.sequence += 1;
        let envelope = Envelope {
            sequence: self.sequence,
            event: event.to_string(),
            timestamp: clock.timestamp_for(self.sequence),
            payload,
            redactions,
        };
        self.envelopes.push(envelope.clone());
        envelope
    }

    /// All recorded envelopes, in delivery order
    pub fn all(&self) -> &[Envelope] {
        &self.envelopes
    }

    pub fn len(&self) -> usize {
        self.envelopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }

    /// Drop all envelopes and reset the sequence to zero
    pub fn clear(&mut self) {
        self.envelopes.clear();
        self.sequence = 0;
    }
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
