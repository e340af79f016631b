// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic event bus with schema enforcement
//!
//! Publishing drives the payload through the middleware chain, validates the
//! outcome against the schema catalog, appends an envelope to the store, and
//! fans out to subscribed handlers - synchronously, on the caller's stack.

use super::envelope::{Envelope, EnvelopeStore};
use super::middleware::Middleware;
use crate::clock::DeterministicClock;
use crate::error::{BusError, HandlerError};
use crate::schema::{SchemaCatalog, SchemaError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

type Handler = Box<dyn FnMut(&Value) -> Result<(), HandlerError>>;

/// Per-publish state threaded explicitly through the dispatch recursion.
///
/// Reset at the start of every top-level publish; never shared across
/// publishes, so redaction bookkeeping cannot leak between calls.
#[derive(Debug, Default)]
struct PublishContext {
    redactions: Vec<String>,
}

/// Outcome of one level of the middleware dispatch
struct Dispatch {
    event: String,
    payload: Value,
    envelope: Option<Envelope>,
    forwarded: bool,
}

/// Continuation handed to a middleware for the rest of the chain.
///
/// A middleware may call [`Next::forward`] zero or more times; each call
/// dispatches the remainder of the chain and returns the downstream
/// `(event, payload)` pair.
pub struct Next<'a> {
    bus: &'a mut Bus,
    ctx: &'a mut PublishContext,
    index: usize,
    inner: Option<Dispatch>,
}

impl Next<'_> {
    /// Continue the chain with the given event and payload
    pub fn forward(&mut self, event: &str, payload: Value) -> Result<(String, Value), BusError> {
        let outcome = self.bus.dispatch(self.index, event, payload, self.ctx)?;
        let pair = (outcome.event.clone(), outcome.payload.clone());
        self.inner = Some(outcome);
        Ok(pair)
    }

    /// Record dotted paths masked during this publish so the eventual
    /// envelope can report them
    pub fn note_redactions<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.ctx.redactions.extend(paths);
    }
}

/// Synchronous deterministic bus backed by JSON Schema validation
pub struct Bus {
    catalog: SchemaCatalog,
    handlers: HashMap<String, Vec<Handler>>,
    middleware: Vec<Arc<dyn Middleware>>,
    store: EnvelopeStore,
    clock: DeterministicClock,
}

impl Bus {
    /// Create a bus with an empty schema catalog
    pub fn new() -> Self {
        Self {
            catalog: SchemaCatalog::new(),
            handlers: HashMap::new(),
            middleware: Vec::new(),
            store: EnvelopeStore::new(),
            clock: DeterministicClock::default(),
        }
    }

    /// Create a bus from a root schema document
    /// (`{"events": {"<name>": <json schema>, ...}}`)
    pub fn from_document(document: &Value) -> Result<Self, SchemaError> {
        let catalog = SchemaCatalog::from_document(document)?;
        Ok(Self {
            catalog,
            handlers: HashMap::new(),
            middleware: Vec::new(),
            store: EnvelopeStore::new(),
            clock: DeterministicClock::default(),
        })
    }

    /// Replace the timestamp source
    pub fn with_clock(mut self, clock: DeterministicClock) -> Self {
        self.clock = clock;
        self
    }

    /// Register a handler for an event name.
    ///
    /// Handlers run synchronously in registration order with the delivered
    /// payload. A handler error aborts the fan-out and surfaces to the
    /// publisher; the envelope is not rolled back.
    pub fn subscribe<F>(&mut self, event: &str, handler: F)
    where
        F: FnMut(&Value) -> Result<(), HandlerError> + 'static,
    {
        self.handlers
            .entry(event.to_string())
            .or_default()
            .push(Box::new(handler));
    }

    /// Append a middleware to the chain; first registered runs outermost
    pub fn use_middleware<M>(&mut self, middleware: M)
    where
        M: Middleware + 'static,
    {
        self.middleware.push(Arc::new(middleware));
    }

    /// Register (or replace) the schema for an event name, including ad hoc
    /// events beyond the construction-time document
    pub fn register_schema(&mut self, event: &str, schema: &Value) -> Result<(), SchemaError> {
        self.catalog.register(event, schema)
    }

    /// Event names with a registered schema, sorted
    pub fn known_events(&self) -> Vec<String> {
        self.catalog.events()
    }

    /// All recorded envelopes, in delivery order
    pub fn envelopes(&self) -> &[Envelope] {
        self.store.all()
    }

    /// Publish an event through the middleware chain.
    ///
    /// Returns `Ok(None)` when the chain halted without any middleware
    /// substituting a result; returns the recorded envelope otherwise.
    pub fn publish(&mut self, event: &str, payload: Value) -> Result<Option<Envelope>, BusError> {
        if !payload.is_object() {
            return Err(BusError::MalformedPayload(value_kind(&payload)));
        }

        let mut ctx = PublishContext::default();
        let outcome = self.dispatch(0, event, payload, &mut ctx)?;
        if !outcome.forwarded {
            tracing::debug!(event, "publish halted by middleware");
            return Ok(None);
        }
        let envelope = match outcome.envelope {
            Some(envelope) => envelope,
            None => self.deliver(&outcome.event, outcome.payload, &ctx)?,
        };
        Ok(Some(envelope))
    }

    /// Drop handlers, middleware, and recorded envelopes.
    ///
    /// The schema catalog is untouched.
    pub fn clear(&mut self) {
        self.handlers.clear();
        self.middleware.clear();
        self.store.clear();
    }

    /// Dispatch the chain starting at `index`.
    ///
    /// At the end of the chain the payload is validated and delivered. At a
    /// middleware level, three outcomes are possible: the middleware
    /// forwarded (outcome comes from downstream), the middleware substituted
    /// an `(event, payload)` pair (delivered here unless downstream already
    /// delivered), or the middleware halted (no envelope at this level).
    fn dispatch(
        &mut self,
        index: usize,
        event: &str,
        payload: Value,
        ctx: &mut PublishContext,
    ) -> Result<Dispatch, BusError> {
        if index >= self.middleware.len() {
            let envelope = self.deliver(event, payload.clone(), ctx)?;
            return Ok(Dispatch {
                event: event.to_string(),
                payload,
                envelope: Some(envelope),
                forwarded: true,
            });
        }

        let middleware = Arc::clone(&self.middleware[index]);
        let mut next = Next {
            bus: &mut *self,
            ctx: &mut *ctx,
            index: index + 1,
            inner: None,
        };
        let substituted = middleware.handle(event, payload.clone(), &mut next)?;
        let inner = next.inner;

        match substituted {
            Some((sub_event, sub_payload)) => {
                // Substitution wins, but an envelope already created by a
                // forward call is never duplicated for the same publish.
                let envelope = match inner.and_then(|d| d.envelope) {
                    Some(envelope) => envelope,
                    None => self.deliver(&sub_event, sub_payload.clone(), ctx)?,
                };
                Ok(Dispatch {
                    event: sub_event,
                    payload: sub_payload,
                    envelope: Some(envelope),
                    forwarded: true,
                })
            }
            None => match inner {
                Some(dispatch) => Ok(dispatch),
                None => Ok(Dispatch {
                    event: event.to_string(),
                    payload,
                    envelope: None,
                    forwarded: false,
                }),
            },
        }
    }

    /// Validate, append the envelope, and fan out to handlers
    fn deliver(
        &mut self,
        event: &str,
        payload: Value,
        ctx: &PublishContext,
    ) -> Result<Envelope, BusError> {
        self.catalog.validate(event, &payload)?;
        let envelope = self
            .store
            .append(event, payload, ctx.redactions.clone(), &self.clock);
        tracing::debug!(event, sequence = envelope.sequence, "delivered event");
        if let Some(handlers) = self.handlers.get_mut(event) {
            for handler in handlers {
                handler(&envelope.payload).map_err(|source| BusError::Handler {
                    event: event.to_string(),
                    source,
                })?;
            }
        }
        Ok(envelope)
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
