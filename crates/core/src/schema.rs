// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schema catalog: one JSON Schema validation rule per event name
//!
//! Every event delivered through the bus must validate against its registered
//! schema; publishing an event name with no registered schema is an error
//! distinct from a payload that fails validation.

use jsonschema::{Draft, Validator};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// A single field-level schema violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer into the payload ("" for the payload root)
    pub path: String,
    /// Human-readable description of the failure
    pub message: String,
}

/// Errors raised by the schema catalog
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown event '{0}'")]
    UnknownEvent(String),
    #[error("invalid schema document: {0}")]
    InvalidDocument(String),
    #[error("invalid schema for event '{event}': {message}")]
    InvalidSchema { event: String, message: String },
    #[error(
        "payload for event '{event}' failed validation ({} violation(s))",
        .violations.len()
    )]
    Validation {
        event: String,
        violations: Vec<Violation>,
    },
}

/// Validation rules for the events a bus accepts.
///
/// Rules are compiled once per registration; re-registering an event name
/// replaces the previous rule.
#[derive(Debug)]
pub struct SchemaCatalog {
    schemas: BTreeMap<String, Value>,
    validators: HashMap<String, Validator>,
}

impl SchemaCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            schemas: BTreeMap::new(),
            validators: HashMap::new(),
        }
    }

    /// Build a catalog from a root document of the form
    /// `{"events": {"<name>": <json schema>, ...}}`
    pub fn from_document(document: &Value) -> Result<Self, SchemaError> {
        let Some(root) = document.as_object() else {
            return Err(SchemaError::InvalidDocument(
                "document must be a json object".to_string(),
            ));
        };
        let Some(events) = root.get("events").and_then(Value::as_object) else {
            return Err(SchemaError::InvalidDocument(
                "document is missing an 'events' mapping".to_string(),
            ));
        };

        let mut catalog = Self::new();
        for (event, schema) in events {
            catalog.register(event, schema)?;
        }
        Ok(catalog)
    }

    /// Register (or replace) the schema for an event name
    pub fn register(&mut self, event: &str, schema: &Value) -> Result<(), SchemaError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(schema)
            .map_err(|err| SchemaError::InvalidSchema {
                event: event.to_string(),
                message: err.to_string(),
            })?;
        self.schemas.insert(event.to_string(), schema.clone());
        self.validators.insert(event.to_string(), validator);
        Ok(())
    }

    /// Validate a payload against the schema registered for the event
    pub fn validate(&self, event: &str, payload: &Value) -> Result<(), SchemaError> {
        let validator = self
            .validators
            .get(event)
            .ok_or_else(|| SchemaError::UnknownEvent(event.to_string()))?;

        let violations: Vec<Violation> = validator
            .iter_errors(payload)
            .map(|err| Violation {
                path: err.instance_path().to_string(),
                message: err.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Validation {
                event: event.to_string(),
                violations,
            })
        }
    }

    /// The schema registered for an event, if any
    pub fn schema_for(&self, event: &str) -> Option<&Value> {
        self.schemas.get(event)
    }

    /// Registered event names, sorted
    pub fn events(&self) -> Vec<String> {
        self.schemas.keys().cloned().collect()
    }
}

impl Default for SchemaCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
