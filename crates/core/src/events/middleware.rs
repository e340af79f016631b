// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Middleware contract and the ready-made logging/redaction middlewares

use super::bus::Next;
use crate::error::BusError;
use serde_json::Value;
use std::collections::HashMap;

/// Replacement written over masked values unless one is configured
pub const REDACTED: &str = "***REDACTED***";

/// One unit in the ordered middleware chain.
///
/// A middleware may call [`Next::forward`] zero or more times to continue
/// the chain, optionally with a different event name or payload. Returning
/// `Some((event, payload))` substitutes the outcome: the pair is validated
/// and delivered if nothing downstream already produced an envelope.
/// Returning `None` leaves the outcome to whatever a forward call decided;
/// with no forward call, the chain halts at this level.
pub trait Middleware {
    fn handle(
        &self,
        event: &str,
        payload: Value,
        next: &mut Next<'_>,
    ) -> Result<Option<(String, Value)>, BusError>;
}

impl<F> Middleware for F
where
    F: for<'a> Fn(&str, Value, &mut Next<'a>) -> Result<Option<(String, Value)>, BusError>,
{
    fn handle(
        &self,
        event: &str,
        payload: Value,
        next: &mut Next<'_>,
    ) -> Result<Option<(String, Value)>, BusError> {
        self(event, payload, next)
    }
}

/// Middleware that mirrors events into a collector callback.
///
/// Forwards the event unchanged after invoking the collector; never halts.
pub struct LoggingMiddleware {
    collector: Box<dyn Fn(&str, &Value)>,
}

impl LoggingMiddleware {
    pub fn new<F>(collector: F) -> Self
    where
        F: Fn(&str, &Value) + 'static,
    {
        Self {
            collector: Box::new(collector),
        }
    }
}

impl Middleware for LoggingMiddleware {
    fn handle(
        &self,
        event: &str,
        payload: Value,
        next: &mut Next<'_>,
    ) -> Result<Option<(String, Value)>, BusError> {
        (self.collector)(event, &payload);
        tracing::debug!(event, "logging middleware observed event");
        let forwarded = next.forward(event, payload)?;
        Ok(Some(forwarded))
    }
}

/// Middleware that masks configured dotted paths in payloads.
///
/// Rules map an event name (or `"*"` for every event) to an ordered list of
/// dotted paths. Wildcard paths apply first, then event-specific paths.
/// Paths that do not fully resolve are skipped silently; every path that was
/// masked is recorded on the publish context so the envelope reports it.
pub struct RedactionMiddleware {
    rules: HashMap<String, Vec<String>>,
    replacement: Value,
}

impl RedactionMiddleware {
    /// Redaction rules keyed by event name (`"*"` matches any event)
    pub fn new(rules: HashMap<String, Vec<String>>) -> Self {
        Self {
            rules,
            replacement: Value::String(REDACTED.to_string()),
        }
    }

    /// Apply the same paths to every event
    pub fn for_all_events(paths: Vec<String>) -> Self {
        let mut rules = HashMap::new();
        rules.insert("*".to_string(), paths);
        Self::new(rules)
    }

    /// Replace the masking sentinel
    pub fn with_replacement(mut self, replacement: Value) -> Self {
        self.replacement = replacement;
        self
    }

    fn paths_for(&self, event: &str) -> Vec<&str> {
        let mut paths: Vec<&str> = Vec::new();
        if let Some(wildcard) = self.rules.get("*") {
            paths.extend(wildcard.iter().map(String::as_str));
        }
        if let Some(specific) = self.rules.get(event) {
            paths.extend(specific.iter().map(String::as_str));
        }
        paths
    }
}

impl Middleware for RedactionMiddleware {
    fn handle(
        &self,
        event: &str,
        payload: Value,
        next: &mut Next<'_>,
    ) -> Result<Option<(String, Value)>, BusError> {
        let paths = self.paths_for(event);
        if paths.is_empty() {
            let forwarded = next.forward(event, payload)?;
            return Ok(Some(forwarded));
        }

        let mut sanitized = payload;
        let mut applied: Vec<String> = Vec::new();
        for path in paths {
            let segments: Vec<&str> = path.split('.').collect();
            if redact_path(&mut sanitized, &segments, &self.replacement) {
                applied.push(path.to_string());
            }
        }
        if !applied.is_empty() {
            tracing::debug!(event, count = applied.len(), "masked payload paths");
            next.note_redactions(applied);
        }
        let forwarded = next.forward(event, sanitized)?;
        Ok(Some(forwarded))
    }
}

/// Walk a dotted path and replace the terminal value.
///
/// Returns false when any segment fails to resolve; the payload is only
/// modified when the full path resolves.
fn redact_path(value: &mut Value, segments: &[&str], replacement: &Value) -> bool {
    let Some((head, tail)) = segments.split_first() else {
        return false;
    };
    match value {
        Value::Object(map) => {
            let Some(child) = map.get_mut(*head) else {
                return false;
            };
            if tail.is_empty() {
                *child = replacement.clone();
                true
            } else {
                redact_path(child, tail, replacement)
            }
        }
        Value::Array(items) => {
            let Ok(index) = head.parse::<usize>() else {
                return false;
            };
            let Some(child) = items.get_mut(index) else {
                return false;
            };
            if tail.is_empty() {
                *child = replacement.clone();
                true
            } else {
                redact_path(child, tail, replacement)
            }
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "middleware_tests.rs"]
mod tests;
