// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trace export: the flat JSON artifact consumed by audit tooling
//!
//! A trace is the ordered array of recorded envelopes, written as one
//! document rather than appended incrementally.

use crate::events::Envelope;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while writing a trace
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializable representation of an [`Envelope`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub sequence: u64,
    pub event: String,
    /// ISO-8601 rendering of the envelope timestamp
    pub timestamp: String,
    pub payload: Value,
    pub redactions: Vec<String>,
}

impl TraceEvent {
    pub fn from_envelope(envelope: &Envelope) -> Self {
        Self {
            sequence: envelope.sequence,
            event: envelope.event.clone(),
            timestamp: envelope
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Micros, false),
            payload: envelope.payload.clone(),
            redactions: envelope.redactions.clone(),
        }
    }
}

/// Create trace events from recorded envelopes
pub fn build_trace(envelopes: &[Envelope]) -> Vec<TraceEvent> {
    envelopes.iter().map(TraceEvent::from_envelope).collect()
}

/// Write envelopes to `target` as one flat JSON array
pub fn write_trace(envelopes: &[Envelope], target: &Path) -> Result<PathBuf, TraceError> {
    let events = build_trace(envelopes);
    let json = serde_json::to_string_pretty(&events)?;
    fs::write(target, json)?;
    Ok(target.to_path_buf())
}

#[cfg(test)]
#[path = "trace_tests.rs"]
mod tests;
