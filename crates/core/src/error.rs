// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the event bus

use crate::schema::SchemaError;
use thiserror::Error;

/// Error type subscribers may return from a handler
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during a publish
#[derive(Debug, Error)]
pub enum BusError {
    /// Payload was not a JSON object; raised before any middleware runs
    #[error("bus payloads must be json objects, got {0}")]
    MalformedPayload(&'static str),
    /// Unknown event or schema validation failure
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// A subscriber failed; the envelope has already been appended
    #[error("handler for '{event}' failed: {source}")]
    Handler { event: String, source: HandlerError },
}
